//! Configuration for the role-scoped retriever.

use std::path::PathBuf;

use finsolve_embeddings::EmbeddingConfig;
use finsolve_vector_store::{DEFAULT_COLLECTION, DEFAULT_INDEX_DIR};
use serde::{Deserialize, Serialize};

/// Where the index lives and how queries are embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Index directory written by ingestion.
    pub index_dir: PathBuf,

    /// Collection name inside the index directory.
    pub collection: String,

    /// Embedding provider configuration. Must match the one used to ingest.
    pub embedding: EmbeddingConfig,
}

impl RetrievalConfig {
    /// Create a new configuration with default values.
    pub fn new(index_dir: impl Into<PathBuf>) -> Self {
        Self {
            index_dir: index_dir.into(),
            collection: DEFAULT_COLLECTION.to_string(),
            embedding: EmbeddingConfig::default(),
        }
    }

    /// Set the collection name.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Set the embedding configuration.
    pub fn with_embedding(mut self, config: EmbeddingConfig) -> Self {
        self.embedding = config;
        self
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_DIR)
    }
}
