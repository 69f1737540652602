//! HTTP server setup and routing.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::handlers;
use crate::state::AppState;

/// Build the router over shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/login", get(handlers::login))
        .route("/test", get(handlers::test))
        .route("/chat", post(handlers::chat))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Serve on an already-bound listener until the process is interrupted.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("Listening on http://{addr}");
    info!("  GET  /login   - verify credentials");
    info!("  GET  /test    - verify credentials");
    info!("  POST /chat    - role-scoped question answering");
    info!("  GET  /health  - index status");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Load the index, bind the configured address, and serve.
pub async fn run_server(config: ServerConfig) -> Result<()> {
    let state = Arc::new(AppState::from_config(&config).await?);
    let listener = TcpListener::bind(config.bind_addr()).await?;
    serve(listener, state).await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
