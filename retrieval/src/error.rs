//! Error types for role-scoped retrieval.

use thiserror::Error;

/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Errors that can occur while retrieving documents.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// Vector store error.
    #[error("vector store error: {0}")]
    Store(#[from] finsolve_vector_store::StoreError),
}
