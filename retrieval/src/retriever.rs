//! Role-scoped document retrieval.

use std::sync::Arc;

use finsolve_vector_store::{SearchHit, VectorIndex, VectorStore};
use tracing::{debug, info};

use crate::config::RetrievalConfig;
use crate::error::Result;
use crate::tier::{AccessTier, SearchRequest};

/// Runs a role's search plan against a shared, read-only index.
#[derive(Clone)]
pub struct RoleScopedRetriever {
    index: Arc<dyn VectorIndex>,
}

impl RoleScopedRetriever {
    pub fn new(index: Arc<dyn VectorIndex>) -> Self {
        Self { index }
    }

    /// Open the persisted index named in `config`.
    ///
    /// A missing index yields a retriever over an empty collection.
    pub async fn from_config(config: &RetrievalConfig) -> Result<Self> {
        let embedder = config.embedding.build_provider();
        let store =
            VectorStore::open_or_empty(&config.index_dir, &config.collection, embedder).await?;
        info!(
            "Retriever ready over {} chunks from {}",
            store.chunk_count(),
            config.index_dir.display()
        );
        Ok(Self::new(Arc::new(store)))
    }

    /// Number of chunks in the underlying index.
    pub fn chunk_count(&self) -> usize {
        self.index.chunk_count()
    }

    /// Up to k chunks for `query` that `role` may see.
    ///
    /// An empty result is a normal outcome.
    pub async fn fetch_docs(&self, query: &str, role: &str) -> Result<Vec<SearchHit>> {
        let tier = AccessTier::classify(role);
        let plan = tier.search_plan();
        debug!("Role {role:?} classified as {tier:?}");

        let hits = self.search(query, &plan.primary).await?;
        if !hits.is_empty() {
            return Ok(hits);
        }

        match &plan.fallback {
            Some(fallback) => {
                debug!("Primary search empty, running fallback");
                self.search(query, fallback).await
            }
            None => Ok(hits),
        }
    }

    async fn search(&self, query: &str, request: &SearchRequest) -> Result<Vec<SearchHit>> {
        Ok(self
            .index
            .similarity_search(query, request.k, request.filter.as_ref())
            .await?)
    }
}
