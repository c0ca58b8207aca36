//! Strongly-typed ID newtypes for domain entities.
//!
//! The backend hands out numeric identifiers. Wrapping them per entity keeps a
//! `ClassId` from being passed where a `CollegeId` is expected.
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_models::ids::{ClassId, CollegeId};
//!
//! fn classes_of(college: CollegeId) { /* ... */ }
//!
//! classes_of(CollegeId::new(3));    // OK
//! // classes_of(ClassId::new(3));   // Compile error! Type mismatch.
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to define a strongly-typed ID newtype over `i64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            #[inline]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            #[inline]
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }
    };
}

define_id!(
    /// Strongly-typed ID for colleges (top of the context hierarchy).
    CollegeId
);

define_id!(
    /// Strongly-typed ID for classes within a college.
    ClassId
);

define_id!(
    /// Strongly-typed ID for sections within a class.
    SectionId
);

define_id!(
    /// Strongly-typed ID for users.
    UserId
);
