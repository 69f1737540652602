//! Department folder name to chunk access metadata.

use finsolve_vector_store::{ChunkMetadata, GENERAL_CATEGORY};

/// Access metadata for every chunk loaded from `department`.
///
/// The role is the lowercased folder name. The category mirrors it, with the
/// company-wide `general` folder pinned to the shared category.
pub fn tag_for_department(department: &str) -> ChunkMetadata {
    let role = department.to_lowercase();
    let category = if role == GENERAL_CATEGORY {
        GENERAL_CATEGORY.to_string()
    } else {
        role.clone()
    };
    ChunkMetadata::new(role, category)
}
