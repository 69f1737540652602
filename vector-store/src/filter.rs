//! Metadata predicates applied before similarity ranking.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::metadata::{ChunkMetadata, MetadataField};

/// A predicate over chunk metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MetadataFilter {
    /// Field equals the value exactly (case-sensitive).
    Eq { field: MetadataField, value: String },

    /// Field equals one of the values exactly.
    In {
        field: MetadataField,
        values: Vec<String>,
    },
}

impl MetadataFilter {
    /// `role == value`
    pub fn role_eq(value: impl Into<String>) -> Self {
        Self::Eq {
            field: MetadataField::Role,
            value: value.into(),
        }
    }

    /// `category == value`
    pub fn category_eq(value: impl Into<String>) -> Self {
        Self::Eq {
            field: MetadataField::Category,
            value: value.into(),
        }
    }

    /// `role in values`
    pub fn role_in<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::In {
            field: MetadataField::Role,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Evaluate the predicate against a chunk's metadata.
    pub fn matches(&self, metadata: &ChunkMetadata) -> bool {
        match self {
            Self::Eq { field, value } => metadata.get(*field) == value,
            Self::In { field, values } => {
                let actual = metadata.get(*field);
                values.iter().any(|v| v == actual)
            }
        }
    }
}

/// Renders in the `{field: value}` / `{field: {$in: [...]}}` form used in logs.
impl fmt::Display for MetadataFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq { field, value } => write!(f, "{{{field}: {value:?}}}"),
            Self::In { field, values } => write!(f, "{{{field}: {{$in: {values:?}}}}}"),
        }
    }
}
