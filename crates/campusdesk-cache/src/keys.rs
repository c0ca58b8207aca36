//! Cache key generation for the context option lists.
//!
//! Keys are derived from the parent selection so that a cached list can only
//! ever be served for the parent it was fetched for.

use campusdesk_models::ids::{ClassId, CollegeId};

/// Builds a cache key from its parts (without the configured prefix).
fn build_key(parts: &[&str]) -> String {
    parts.join(":")
}

/// Cache keys for college options.
pub mod colleges {
    use super::*;

    /// Key for the full list of colleges visible to the user.
    pub fn all() -> String {
        build_key(&["colleges"])
    }

    /// Prefix matching every college key.
    pub fn invalidation_prefix() -> String {
        build_key(&["colleges"])
    }
}

/// Cache keys for class options.
pub mod classes {
    use super::*;

    /// Key for classes of a college, or of the user's own scope when `None`.
    pub fn by_college(college_id: Option<CollegeId>) -> String {
        match college_id {
            Some(id) => build_key(&["classes", "college", &id.to_string()]),
            None => build_key(&["classes", "scoped"]),
        }
    }

    /// Prefix matching every class key.
    pub fn invalidation_prefix() -> String {
        build_key(&["classes"])
    }
}

/// Cache keys for section options.
pub mod sections {
    use super::*;

    /// Key for sections of a class.
    pub fn by_class(class_id: ClassId) -> String {
        build_key(&["sections", "class", &class_id.to_string()])
    }

    /// Prefix matching every section key.
    pub fn invalidation_prefix() -> String {
        build_key(&["sections"])
    }
}
