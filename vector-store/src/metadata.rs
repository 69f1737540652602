//! Access metadata attached to every stored chunk.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category value shared by documents every employee may read.
pub const GENERAL_CATEGORY: &str = "general";

/// Metadata stored with each chunk. Fixed at ingestion time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Lowercased department name.
    pub role: String,

    /// Mirrors `role`; `"general"` marks company-wide documents.
    pub category: String,
}

impl ChunkMetadata {
    /// Create metadata from explicit values.
    pub fn new(role: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            category: category.into(),
        }
    }

    /// Read a metadata field by name.
    pub fn get(&self, field: MetadataField) -> &str {
        match field {
            MetadataField::Role => &self.role,
            MetadataField::Category => &self.category,
        }
    }
}

/// Filterable metadata fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataField {
    Role,
    Category,
}

impl MetadataField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::Category => "category",
        }
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
