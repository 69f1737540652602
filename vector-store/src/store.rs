//! Persisted vector store.
//!
//! A collection is stored as one JSON file inside the index directory,
//! written atomically through a temp file. Ingestion always builds a fresh
//! collection; serving opens it read-only.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use finsolve_embeddings::{EmbeddingError, EmbeddingProvider, EmbeddingRequest};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::collection::{Collection, NewChunk, SearchHit};
use crate::error::{Result, StoreError};
use crate::filter::MetadataFilter;

/// Read-only similarity search over an index.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Return up to `k` chunks passing `filter`, most similar first.
    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<SearchHit>>;

    /// Number of chunks in the index.
    fn chunk_count(&self) -> usize;
}

/// A collection bound to the embedder that produced it.
pub struct VectorStore {
    root: PathBuf,
    collection: Collection,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl VectorStore {
    /// Embed `chunks` and persist them as a new collection under `root`.
    ///
    /// Overwrites any collection file with the same name.
    pub async fn create(
        root: impl AsRef<Path>,
        name: &str,
        embedder: Arc<dyn EmbeddingProvider>,
        chunks: Vec<NewChunk>,
        batch_size: usize,
    ) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let batch_size = batch_size.max(1);
        ensure_available(embedder.as_ref())?;

        let mut collection = Collection::new(
            name,
            embedder.default_model(),
            embedder.default_dimension(),
        );

        let total = chunks.len();
        let mut remaining = chunks.into_iter();
        loop {
            let batch: Vec<NewChunk> = remaining.by_ref().take(batch_size).collect();
            if batch.is_empty() {
                break;
            }

            let requests = batch
                .iter()
                .map(|chunk| EmbeddingRequest::new(chunk.text.as_str()))
                .collect();
            let responses = embedder.embed_batch(requests).await?;
            if responses.len() != batch.len() {
                return Err(StoreError::Storage(format!(
                    "embedder returned {} vectors for {} chunks",
                    responses.len(),
                    batch.len()
                )));
            }

            for (chunk, response) in batch.into_iter().zip(responses) {
                collection.add(chunk, response.embedding)?;
            }
            debug!("Embedded {}/{total} chunks", collection.len());
        }

        let store = Self {
            root,
            collection,
            embedder,
        };
        store.save().await?;

        info!(
            "Persisted {} chunks to collection {} at {}",
            store.collection.len(),
            name,
            store.root.display()
        );
        Ok(store)
    }

    /// Open a persisted collection.
    pub async fn open(
        root: impl AsRef<Path>,
        name: &str,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let path = collection_path(&root, name);

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::CollectionNotFound(format!(
                    "{name} in {}",
                    root.display()
                )));
            }
            Err(e) => {
                return Err(StoreError::Storage(format!("{}: {e}", path.display())));
            }
        };

        let collection: Collection = serde_json::from_str(&content)?;

        if collection.dimension() != embedder.default_dimension() {
            return Err(StoreError::DimensionMismatch {
                expected: collection.dimension(),
                actual: embedder.default_dimension(),
            });
        }
        if collection.model() != embedder.default_model() {
            warn!(
                "Collection {name} was built with model {}, querying with {}",
                collection.model(),
                embedder.default_model()
            );
        }

        info!("Loaded {} chunks from collection {name}", collection.len());
        Ok(Self {
            root,
            collection,
            embedder,
        })
    }

    /// Open a persisted collection, or start with an empty one if none exists.
    pub async fn open_or_empty(
        root: impl AsRef<Path>,
        name: &str,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        match Self::open(&root, name, Arc::clone(&embedder)).await {
            Err(StoreError::CollectionNotFound(what)) => {
                warn!("No persisted collection ({what}); starting with an empty index");
                Ok(Self {
                    collection: Collection::new(
                        name,
                        embedder.default_model(),
                        embedder.default_dimension(),
                    ),
                    root,
                    embedder,
                })
            }
            other => other,
        }
    }

    /// The underlying collection.
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Index directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| {
                StoreError::Storage(format!(
                    "failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;

        let path = collection_path(&self.root, self.collection.name());
        let content = serde_json::to_string(&self.collection)?;

        // Write atomically using a temp file
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &content)
            .await
            .map_err(|e| StoreError::Storage(format!("{}: {e}", temp_path.display())))?;

        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| StoreError::Storage(format!("{}: {e}", path.display())))?;

        debug!("Saved collection file {}", path.display());
        Ok(())
    }
}

#[async_trait]
impl VectorIndex for VectorStore {
    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<SearchHit>> {
        if self.collection.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let response = self.embedder.embed(EmbeddingRequest::new(query)).await?;
        let hits = self.collection.search(&response.embedding, k, filter)?;

        match filter {
            Some(filter) => debug!("Search k={k} filter={filter} returned {}", hits.len()),
            None => debug!("Search k={k} unfiltered returned {}", hits.len()),
        }
        Ok(hits)
    }

    fn chunk_count(&self) -> usize {
        self.collection.len()
    }
}

/// Delete the index directory and everything in it.
///
/// Returns whether anything was removed; a missing directory is not an error.
pub async fn reset_index_dir(root: impl AsRef<Path>) -> Result<bool> {
    let root = root.as_ref();
    match fs::remove_dir_all(root).await {
        Ok(()) => {
            info!("Removed existing index directory {}", root.display());
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(StoreError::Storage(format!("{}: {e}", root.display()))),
    }
}

fn ensure_available(embedder: &dyn EmbeddingProvider) -> Result<()> {
    if embedder.is_available() {
        Ok(())
    } else {
        Err(EmbeddingError::ProviderNotConfigured(embedder.name().to_string()).into())
    }
}

fn collection_path(root: &Path, name: &str) -> PathBuf {
    root.join(format!("{name}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ChunkMetadata;
    use finsolve_embeddings::{HashingEmbedder, OllamaEmbeddingProvider};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn embedder() -> Arc<dyn EmbeddingProvider> {
        Arc::new(HashingEmbedder::new(64))
    }

    fn chunks() -> Vec<NewChunk> {
        vec![
            NewChunk::new(
                "Q1 budget allocations for finance",
                ChunkMetadata::new("finance", "finance"),
            ),
            NewChunk::new(
                "Holiday policy for all employees",
                ChunkMetadata::new("general", "general"),
            ),
            NewChunk::new(
                "Engineering onboarding checklist",
                ChunkMetadata::new("engineering", "engineering"),
            ),
        ]
    }

    #[tokio::test]
    async fn test_create_and_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("index");

        let created = VectorStore::create(&root, "docs", embedder(), chunks(), 2)
            .await
            .unwrap();
        assert_eq!(created.chunk_count(), 3);

        let reopened = VectorStore::open(&root, "docs", embedder()).await.unwrap();
        assert_eq!(reopened.chunk_count(), 3);
        assert_eq!(
            reopened.collection().metadata_distribution(),
            created.collection().metadata_distribution()
        );
    }

    #[tokio::test]
    async fn test_filtered_search() {
        let temp_dir = TempDir::new().unwrap();
        let store = VectorStore::create(temp_dir.path(), "docs", embedder(), chunks(), 8)
            .await
            .unwrap();

        let filter = MetadataFilter::category_eq("general");
        let hits = store
            .similarity_search("budget", 3, Some(&filter))
            .await
            .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].metadata.role, "general");
    }

    #[tokio::test]
    async fn test_open_missing_collection() {
        let temp_dir = TempDir::new().unwrap();
        let result = VectorStore::open(temp_dir.path(), "docs", embedder()).await;
        assert!(matches!(result, Err(StoreError::CollectionNotFound(_))));

        let empty = VectorStore::open_or_empty(temp_dir.path(), "docs", embedder())
            .await
            .unwrap();
        assert_eq!(empty.chunk_count(), 0);
        assert!(empty.similarity_search("anything", 3, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_rejects_other_dimension() {
        let temp_dir = TempDir::new().unwrap();
        VectorStore::create(temp_dir.path(), "docs", embedder(), chunks(), 8)
            .await
            .unwrap();

        let other: Arc<dyn EmbeddingProvider> = Arc::new(HashingEmbedder::new(32));
        let result = VectorStore::open(temp_dir.path(), "docs", other).await;
        assert!(matches!(
            result,
            Err(StoreError::DimensionMismatch {
                expected: 64,
                actual: 32
            })
        ));
    }

    #[tokio::test]
    async fn test_create_requires_configured_provider() {
        let temp_dir = TempDir::new().unwrap();
        let unconfigured: Arc<dyn EmbeddingProvider> =
            Arc::new(OllamaEmbeddingProvider::new().with_base_url(""));

        let result = VectorStore::create(temp_dir.path(), "docs", unconfigured, chunks(), 8).await;
        assert!(matches!(
            result,
            Err(StoreError::Embedding(EmbeddingError::ProviderNotConfigured(_)))
        ));
        assert!(!temp_dir.path().join("docs.json").exists());
    }

    #[tokio::test]
    async fn test_reset_index_dir() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("index");
        VectorStore::create(&root, "docs", embedder(), chunks(), 8)
            .await
            .unwrap();

        assert!(reset_index_dir(&root).await.unwrap());
        assert!(!root.exists());
        assert!(!reset_index_dir(&root).await.unwrap());
    }
}
