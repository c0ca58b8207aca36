//! # campusdesk Core
//!
//! Foundational types shared by every campusdesk crate:
//!
//! - [`errors`]: application error type with an error category
//! - [`permissions`]: permission keys, roles, and payload normalization
//! - [`serde`]: custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_core::errors::AppError;
//! use campusdesk_core::permissions::{normalize, Role};
//!
//! let perms = normalize(Role::Teacher, raw);
//! if !perms.can_choose_college() {
//!     return Err(AppError::validation(anyhow::anyhow!("college is fixed for teachers")));
//! }
//! ```

pub mod errors;
pub mod permissions;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind};
pub use permissions::{
    ActionGrant, Capability, NormalizedPermissions, RawPermissions, Role, Scope, normalize,
};
