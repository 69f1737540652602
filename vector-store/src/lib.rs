//! # Vector Store
//!
//! An embedded, persisted vector collection. Each entry is a chunk of
//! document text, its embedding, and access metadata (`role`, `category`)
//! used to scope similarity search per caller.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  NewChunk ──► VectorStore::create ──► <index_dir>/<name>.json   │
//! │                                              │                  │
//! │  query + MetadataFilter ──► VectorIndex::similarity_search      │
//! │                                              │                  │
//! │                                              ▼                  │
//! │                                          SearchHit              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod collection;
pub mod error;
pub mod filter;
pub mod metadata;
pub mod store;

pub use collection::{Collection, NewChunk, SearchHit, StoredChunk};
pub use error::{Result, StoreError};
pub use filter::MetadataFilter;
pub use metadata::{ChunkMetadata, GENERAL_CATEGORY, MetadataField};
pub use store::{VectorIndex, VectorStore, reset_index_dir};

/// Collection name shared by ingestion and serving.
pub const DEFAULT_COLLECTION: &str = "company_docs";

/// Index directory used when none is configured.
pub const DEFAULT_INDEX_DIR: &str = "chroma_db";
