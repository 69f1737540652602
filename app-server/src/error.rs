//! Error types for the chat service.

use thiserror::Error;

/// Result type alias for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Errors raised while starting or running the service.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Retrieval error.
    #[error("{0}")]
    Retrieval(#[from] finsolve_retrieval::RetrievalError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
