//! # Chat Service
//!
//! HTTP front end for role-scoped question answering:
//!
//! - `GET /login`, `GET /test`: HTTP Basic checks against a [`CredentialStore`]
//! - `POST /chat`: retrieve chunks visible to the caller's role, then ask the
//!   generation backend to answer from them
//! - `GET /health`: index status

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use auth::{AuthenticatedUser, CredentialStore, StaticCredentialStore, UserRecord};
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use server::{build_router, run_server, serve};
pub use state::AppState;
