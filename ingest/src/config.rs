//! Configuration for an ingestion run.

use std::path::{Path, PathBuf};

use finsolve_embeddings::EmbeddingConfig;
use finsolve_vector_store::{DEFAULT_COLLECTION, DEFAULT_INDEX_DIR};
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};
use crate::splitter::SplitterConfig;

/// Default location of the department folders.
pub const DEFAULT_DATA_DIR: &str = "../resources/data";

/// Configuration for an ingestion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Root holding one sub-directory per department.
    pub data_dir: PathBuf,

    /// Index directory. Deleted and rebuilt on every run.
    pub index_dir: PathBuf,

    /// Collection name inside the index directory.
    pub collection: String,

    /// Chunking configuration.
    pub splitter: SplitterConfig,

    /// Embedding provider configuration.
    pub embedding: EmbeddingConfig,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            index_dir: PathBuf::from(DEFAULT_INDEX_DIR),
            collection: DEFAULT_COLLECTION.to_string(),
            splitter: SplitterConfig::default(),
            embedding: EmbeddingConfig::default(),
        }
    }
}

impl IngestConfig {
    /// Load configuration from a TOML file. Missing keys take defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| IngestError::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| IngestError::Config(format!("{}: {e}", path.display())))
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the index directory.
    pub fn with_index_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.index_dir = dir.into();
        self
    }

    /// Set the embedding configuration.
    pub fn with_embedding(mut self, config: EmbeddingConfig) -> Self {
        self.embedding = config;
        self
    }

    /// Set the splitter configuration.
    pub fn with_splitter(mut self, config: SplitterConfig) -> Self {
        self.splitter = config;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsolve_embeddings::EmbeddingProviderType;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = IngestConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("../resources/data"));
        assert_eq!(config.index_dir, PathBuf::from("chroma_db"));
        assert_eq!(config.collection, "company_docs");
        assert_eq!(config.splitter.chunk_size, 500);
        assert_eq!(config.splitter.chunk_overlap, 50);
    }

    #[test]
    fn test_partial_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ingest.toml");
        std::fs::write(
            &path,
            "data_dir = \"/srv/data\"\n\n[embedding]\nprovider = \"hashing\"\ndimension = 128\n",
        )
        .unwrap();

        let config = IngestConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/data"));
        assert_eq!(config.index_dir, PathBuf::from("chroma_db"));
        assert_eq!(config.embedding.provider, EmbeddingProviderType::Hashing);
        assert_eq!(config.embedding.dimension, 128);
        assert_eq!(config.embedding.batch_size, 64);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = IngestConfig::from_toml_file("/nonexistent/ingest.toml");
        assert!(matches!(result, Err(IngestError::Config(_))));
    }
}
