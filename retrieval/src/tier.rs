//! Access tiers and the searches they translate to.
//!
//! | tier              | matched by (lowercased role)   | primary                  | fallback              |
//! |-------------------|--------------------------------|--------------------------|-----------------------|
//! | `Executive`       | contains `c-levelexecutives`   | k=3, unfiltered          | k=5, role in allow-list |
//! | `GeneralEmployee` | contains `employee`            | k=3, category == general | none                  |
//! | `Departmental`    | anything else                  | k=3, role == verbatim    | none                  |

use finsolve_vector_store::{GENERAL_CATEGORY, MetadataFilter};

/// Marker identifying executive roles. Checked before the employee marker.
pub const EXECUTIVE_MARKER: &str = "c-levelexecutives";

/// Marker identifying general employees.
pub const EMPLOYEE_MARKER: &str = "employee";

/// Roles an executive may see when the unfiltered search finds nothing.
pub const EXECUTIVE_FALLBACK_ROLES: [&str; 5] =
    ["engineering", "hr", "finance", "marketing", "general"];

/// Results requested by every primary search.
pub const DEFAULT_K: usize = 3;

/// Results requested by the executive fallback search.
pub const EXECUTIVE_FALLBACK_K: usize = 5;

/// A single similarity search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub k: usize,
    pub filter: Option<MetadataFilter>,
}

impl SearchRequest {
    fn new(k: usize, filter: Option<MetadataFilter>) -> Self {
        Self { k, filter }
    }
}

/// The searches run for one tier. `fallback` runs only if `primary` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPlan {
    pub primary: SearchRequest,
    pub fallback: Option<SearchRequest>,
}

/// Access class of a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessTier {
    Executive,
    GeneralEmployee,
    /// Carries the role exactly as supplied; matching against chunk
    /// metadata is case-sensitive.
    Departmental(String),
}

impl AccessTier {
    /// Classify a role label.
    pub fn classify(role: &str) -> Self {
        let normalized = role.to_lowercase();
        if normalized.contains(EXECUTIVE_MARKER) {
            Self::Executive
        } else if normalized.contains(EMPLOYEE_MARKER) {
            Self::GeneralEmployee
        } else {
            Self::Departmental(role.to_string())
        }
    }

    pub fn search_plan(&self) -> SearchPlan {
        match self {
            Self::Executive => SearchPlan {
                primary: SearchRequest::new(DEFAULT_K, None),
                fallback: Some(SearchRequest::new(
                    EXECUTIVE_FALLBACK_K,
                    Some(MetadataFilter::role_in(EXECUTIVE_FALLBACK_ROLES)),
                )),
            },
            Self::GeneralEmployee => SearchPlan {
                primary: SearchRequest::new(
                    DEFAULT_K,
                    Some(MetadataFilter::category_eq(GENERAL_CATEGORY)),
                ),
                fallback: None,
            },
            Self::Departmental(role) => SearchPlan {
                primary: SearchRequest::new(
                    DEFAULT_K,
                    Some(MetadataFilter::role_eq(role.as_str())),
                ),
                fallback: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify() {
        assert_eq!(AccessTier::classify("c-levelexecutives"), AccessTier::Executive);
        assert_eq!(AccessTier::classify("C-LevelExecutives"), AccessTier::Executive);
        assert_eq!(AccessTier::classify("employee"), AccessTier::GeneralEmployee);
        assert_eq!(AccessTier::classify("Employee"), AccessTier::GeneralEmployee);
        assert_eq!(
            AccessTier::classify("finance"),
            AccessTier::Departmental("finance".to_string())
        );
        assert_eq!(
            AccessTier::classify("Finance"),
            AccessTier::Departmental("Finance".to_string())
        );
    }

    #[test]
    fn test_executive_marker_wins_over_employee() {
        assert_eq!(
            AccessTier::classify("c-levelexecutives-employee"),
            AccessTier::Executive
        );
    }

    #[test]
    fn test_employee_plan_is_general_only() {
        for role in ["employee", "contract-employee", "EMPLOYEE"] {
            let plan = AccessTier::classify(role).search_plan();
            assert_eq!(
                plan,
                SearchPlan {
                    primary: SearchRequest::new(3, Some(MetadataFilter::category_eq("general"))),
                    fallback: None,
                }
            );
        }
    }

    #[test]
    fn test_departmental_plan_uses_verbatim_role() {
        let plan = AccessTier::classify("Marketing").search_plan();
        assert_eq!(plan.primary.filter, Some(MetadataFilter::role_eq("Marketing")));
        assert_eq!(plan.primary.k, 3);
        assert_eq!(plan.fallback, None);
    }

    #[test]
    fn test_executive_plan() {
        let plan = AccessTier::Executive.search_plan();
        assert_eq!(plan.primary, SearchRequest::new(3, None));
        assert_eq!(
            plan.fallback,
            Some(SearchRequest::new(
                5,
                Some(MetadataFilter::role_in([
                    "engineering",
                    "hr",
                    "finance",
                    "marketing",
                    "general"
                ]))
            ))
        );
    }
}
