//! Embedding provider configuration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::DEFAULT_DIMENSION;
use crate::provider::{EmbeddingProvider, HashingEmbedder, OllamaEmbeddingProvider};

/// Configuration for the embedding provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Which provider to use.
    pub provider: EmbeddingProviderType,

    /// Model to use for embeddings. Ignored by the hashing provider.
    pub model: Option<String>,

    /// Base URL of the embedding service.
    pub base_url: Option<String>,

    /// Embedding dimension.
    pub dimension: usize,

    /// Number of texts sent per embedding request during ingestion.
    pub batch_size: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderType::Ollama,
            model: None,
            base_url: None,
            dimension: DEFAULT_DIMENSION,
            batch_size: 64,
        }
    }
}

impl EmbeddingConfig {
    /// Configuration for the offline hashing embedder.
    pub fn hashing() -> Self {
        Self {
            provider: EmbeddingProviderType::Hashing,
            ..Self::default()
        }
    }

    /// Set the provider type.
    pub fn with_provider(mut self, provider: EmbeddingProviderType) -> Self {
        self.provider = provider;
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the service base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the embedding dimension.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Set the ingestion batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Build the configured provider.
    pub fn build_provider(&self) -> Arc<dyn EmbeddingProvider> {
        match self.provider {
            EmbeddingProviderType::Ollama => {
                let mut provider = OllamaEmbeddingProvider::new().with_dimension(self.dimension);
                if let Some(url) = &self.base_url {
                    provider = provider.with_base_url(url.as_str());
                }
                if let Some(model) = &self.model {
                    provider = provider.with_model(model.as_str());
                }
                Arc::new(provider)
            }
            EmbeddingProviderType::Hashing => Arc::new(HashingEmbedder::new(self.dimension)),
        }
    }
}

/// Type of embedding provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProviderType {
    /// Local Ollama embedding endpoint.
    Ollama,
    /// Deterministic feature hashing, no model required.
    Hashing,
}
