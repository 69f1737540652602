//! Request handlers.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use finsolve_ollama::GenerationError;
use finsolve_retrieval::{build_context, make_prompt};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::auth::AuthenticatedUser;
use crate::error::Result;
use crate::state::AppState;

/// Caller identity as sent in the chat body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatUser {
    pub username: String,
    pub role: String,
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub user: ChatUser,
    pub message: String,
}

/// Body returned by `POST /chat`. Always sent with status 200.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChatResponse {
    Answer {
        username: String,
        role: String,
        query: String,
        response: String,
    },
    Notice {
        response: String,
    },
}

impl ChatResponse {
    fn no_data(role: &str) -> Self {
        Self::Notice {
            response: format!("No relevant data found for your role: {role}"),
        }
    }

    fn failure(message: impl std::fmt::Display) -> Self {
        Self::Notice {
            response: format!("Error during chat: {message}"),
        }
    }
}

/// Body of `/login` and `/test`.
#[derive(Debug, Clone, Serialize)]
pub struct GreetingResponse {
    pub message: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub chunks: usize,
}

/// `GET /login`
pub async fn login(user: AuthenticatedUser) -> Json<GreetingResponse> {
    info!("{} logged in as {}", user.username, user.role);
    Json(GreetingResponse {
        message: format!("Welcome {}!", user.username),
        role: user.role,
    })
}

/// `GET /test`
pub async fn test(user: AuthenticatedUser) -> Json<GreetingResponse> {
    Json(GreetingResponse {
        message: format!("Hello {}! You can now chat.", user.username),
        role: user.role,
    })
}

/// `GET /health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        chunks: state.retriever().chunk_count(),
    })
}

/// `POST /chat`
///
/// The role is taken from the body as sent; callers are not re-authenticated.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Json<ChatResponse> {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!("Unreadable chat body: {rejection}");
            return Json(ChatResponse::failure(rejection.body_text()));
        }
    };

    let request: ChatRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Malformed chat request: {e}");
            return Json(ChatResponse::failure(e));
        }
    };

    match answer(&state, request).await {
        Ok(response) => Json(response),
        Err(e) => {
            error!("Chat failed: {e}");
            Json(ChatResponse::failure(e))
        }
    }
}

async fn answer(state: &AppState, request: ChatRequest) -> Result<ChatResponse> {
    let ChatRequest { user, message } = request;
    debug!("Chat from {} ({}): {message}", user.username, user.role);

    let hits = state.retriever().fetch_docs(&message, &user.role).await?;
    if hits.is_empty() {
        return Ok(ChatResponse::no_data(&user.role));
    }

    let prompt = make_prompt(&message, &user.role, &build_context(&hits));
    let response = match state.generator().generate(&prompt).await {
        Ok(text) => text,
        Err(GenerationError::Status { status, body }) => {
            warn!("Generation backend returned {status}");
            format!("Ollama LLM error: {body}")
        }
        Err(e) => {
            warn!("Generation backend failed: {e}");
            format!("Ollama LLM error: {e}")
        }
    };

    Ok(ChatResponse::Answer {
        username: user.username,
        role: user.role,
        query: message,
        response,
    })
}
