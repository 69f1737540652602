//! # Ingestion
//!
//! Builds the role-tagged vector index from a tree of department folders:
//!
//! ```text
//! data/
//! ├── engineering/   ──► role "engineering"
//! ├── finance/       ──► role "finance"
//! └── general/       ──► role "general", category "general"
//! ```
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  department dir ──► FileKind loader ──► Document                │
//! │                                            │                    │
//! │                                            ▼                    │
//! │  RecursiveCharacterSplitter ──► tag_for_department ──► NewChunk │
//! │                                                          │      │
//! │                                                          ▼      │
//! │                                          VectorStore::create    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A run always replaces the whole index; it must not overlap with another
//! run or with a server reading the same index directory.

pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod splitter;
pub mod tagging;

pub use config::IngestConfig;
pub use error::{IngestError, LoadError, Result};
pub use loader::{Document, FileKind};
pub use pipeline::{DepartmentReport, IngestPipeline, IngestReport};
pub use splitter::{RecursiveCharacterSplitter, SplitterConfig};
pub use tagging::tag_for_department;
