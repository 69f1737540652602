//! Error types for the vector store.

use thiserror::Error;

/// Result type alias for vector store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in the vector store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Embedding generation failed.
    #[error("embedding error: {0}")]
    Embedding(#[from] finsolve_embeddings::EmbeddingError),

    /// Persisted collection not found.
    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    /// Persisted collection was built with a different embedding shape.
    #[error("dimension mismatch: collection has {expected}, embedder produces {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
