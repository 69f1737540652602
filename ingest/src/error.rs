//! Error types for ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Errors that abort an ingestion run.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Data root missing or unreadable.
    #[error("data directory not readable: {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No department produced any document.
    #[error("no documents processed under {0}")]
    EmptyCorpus(PathBuf),

    /// Writing the index failed.
    #[error("vector store error: {0}")]
    Store(#[from] finsolve_vector_store::StoreError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors loading a single file. These skip the file, never the run.
#[derive(Error, Debug)]
pub enum LoadError {
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid UTF-8 text.
    #[error("invalid utf-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// Malformed CSV.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
