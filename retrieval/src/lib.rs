//! # Role-Scoped Retrieval
//!
//! Maps a caller's role to an access tier, runs that tier's similarity
//! searches against the shared index, and assembles the generation prompt.
//!
//! ```text
//! role ──► AccessTier::classify ──► SearchPlan ──► VectorIndex ──► hits
//!                                                                   │
//!                                    query, role ──► make_prompt ◄──┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use finsolve_retrieval::{RetrievalConfig, RoleScopedRetriever, build_context, make_prompt};
//!
//! let retriever = RoleScopedRetriever::from_config(&RetrievalConfig::default()).await?;
//! let hits = retriever.fetch_docs("What was the Q1 budget?", "finance").await?;
//! let prompt = make_prompt("What was the Q1 budget?", "finance", &build_context(&hits));
//! ```

pub mod config;
pub mod error;
pub mod prompt;
pub mod retriever;
pub mod tier;

pub use config::RetrievalConfig;
pub use error::{Result, RetrievalError};
pub use prompt::{build_context, make_prompt};
pub use retriever::RoleScopedRetriever;
pub use tier::{AccessTier, SearchPlan, SearchRequest};

// Re-export from dependencies for convenience
pub use finsolve_vector_store::{MetadataFilter, SearchHit, VectorIndex};
