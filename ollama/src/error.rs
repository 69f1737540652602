//! Error types for text generation.

use thiserror::Error;

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Errors that can occur while generating text.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Backend answered with a non-success status.
    #[error("{status}: {body}")]
    Status { status: u16, body: String },

    /// Transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Success status, unreadable body.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
