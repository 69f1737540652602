//! # Embeddings
//!
//! This crate turns document and query text into dense vectors for the
//! role-scoped document index.
//!
//! ## Features
//!
//! - **Embedding Generation**: Convert text to dense vectors
//! - **Multiple Providers**: A local Ollama embedding endpoint, or a
//!   deterministic offline hashing embedder
//! - **Similarity**: Cosine similarity and normalization helpers
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Embeddings System                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  EmbeddingConfig ──► EmbeddingProvider ──► Embedding            │
//! │                           │                    │                │
//! │                           ▼                    ▼                │
//! │                 Ollama / Hashing        cosine_similarity       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod provider;
pub mod similarity;

pub use config::{EmbeddingConfig, EmbeddingProviderType};
pub use error::{EmbeddingError, Result};
pub use provider::{
    EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, HashingEmbedder,
    OllamaEmbeddingProvider,
};
pub use similarity::{cosine_similarity, normalize, rank_top_k};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;

/// Dimension of embeddings produced by `all-MiniLM-L6-v2` style models.
pub const DEFAULT_DIMENSION: usize = 384;
