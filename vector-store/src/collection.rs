//! In-memory collection of embedded chunks.

use std::collections::BTreeMap;

use finsolve_embeddings::{Embedding, normalize, rank_top_k};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::filter::MetadataFilter;
use crate::metadata::ChunkMetadata;

/// A chunk waiting to be embedded and stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChunk {
    /// Chunk text.
    pub text: String,

    /// Access metadata.
    pub metadata: ChunkMetadata,

    /// File the chunk was cut from.
    pub source: Option<String>,
}

impl NewChunk {
    pub fn new(text: impl Into<String>, metadata: ChunkMetadata) -> Self {
        Self {
            text: text.into(),
            metadata,
            source: None,
        }
    }

    /// Set the source file.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// A chunk as persisted in a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredChunk {
    /// Unique identifier.
    pub id: String,

    /// Chunk text.
    pub text: String,

    /// The embedding vector (normalized).
    pub embedding: Embedding,

    /// Access metadata.
    pub metadata: ChunkMetadata,

    /// File the chunk was cut from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// A similarity search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// ID of the matched chunk.
    pub id: String,

    /// Chunk text.
    pub text: String,

    /// Access metadata of the chunk.
    pub metadata: ChunkMetadata,

    /// File the chunk was cut from.
    pub source: Option<String>,

    /// Cosine similarity to the query.
    pub score: f32,
}

/// A named set of embedded chunks sharing one embedding model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    name: String,
    model: String,
    dimension: usize,
    entries: Vec<StoredChunk>,
}

impl Collection {
    /// Create an empty collection.
    pub fn new(name: impl Into<String>, model: impl Into<String>, dimension: usize) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            dimension,
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Embedding model the collection was built with.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All stored chunks in insertion order.
    pub fn entries(&self) -> &[StoredChunk] {
        &self.entries
    }

    /// Add an embedded chunk.
    pub fn add(&mut self, chunk: NewChunk, mut embedding: Embedding) -> Result<&StoredChunk> {
        if embedding.len() != self.dimension {
            return Err(StoreError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.len(),
            });
        }

        normalize(&mut embedding);

        let id = uuid::Uuid::new_v4().to_string();
        debug!("Added chunk {id} ({}) to {}", chunk.metadata.role, self.name);

        let index = self.entries.len();
        self.entries.push(StoredChunk {
            id,
            text: chunk.text,
            embedding,
            metadata: chunk.metadata,
            source: chunk.source,
        });
        Ok(&self.entries[index])
    }

    /// Rank chunks passing `filter` by similarity to `query`.
    pub fn search(
        &self,
        query: &[f32],
        k: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<SearchHit>> {
        if query.len() != self.dimension {
            return Err(StoreError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let candidates = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| filter.is_none_or(|f| f.matches(&entry.metadata)))
            .map(|(position, entry)| (position, entry.embedding.as_slice()));

        let ranked = rank_top_k(query, candidates, k)?;

        Ok(ranked
            .into_iter()
            .map(|(position, score)| {
                let entry = &self.entries[position];
                SearchHit {
                    id: entry.id.clone(),
                    text: entry.text.clone(),
                    metadata: entry.metadata.clone(),
                    source: entry.source.clone(),
                    score,
                }
            })
            .collect())
    }

    /// Count of chunks per distinct metadata value.
    pub fn metadata_distribution(&self) -> BTreeMap<ChunkMetadata, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.metadata.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Metadata of the first `n` chunks.
    pub fn sample_metadata(&self, n: usize) -> Vec<ChunkMetadata> {
        self.entries
            .iter()
            .take(n)
            .map(|e| e.metadata.clone())
            .collect()
    }
}
