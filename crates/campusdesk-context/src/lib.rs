//! # campusdesk Context
//!
//! Permission-gated College → Class → Section selection.
//!
//! This crate provides:
//! - [`PermissionsContext`] / [`PermissionsProvider`]: the normalized
//!   permissions and user context, loaded once per session
//! - [`HierarchicalContext`]: the selection store with cascade invalidation
//! - [`derive_auto_selection`]: the pure auto-selection policy
//! - [`ContextFetcher`]: option list fetching with a stale-response guard
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_context::{ContextFetcher, HierarchicalContext, PermissionsProvider};
//!
//! let permissions = Arc::new(PermissionsProvider::new());
//! permissions.load(client.as_ref()).await?;
//!
//! let fetcher = ContextFetcher::new(client, permissions, Arc::new(HierarchicalContext::new()), cache);
//! fetcher.sync().await?;
//! fetcher.choose_college(Some(CollegeId::new(3))).await?;
//! ```

pub mod api;
pub mod auto_select;
pub mod fetch;
pub mod hierarchy;
pub mod permissions;

pub use api::{ApiFuture, ContextApi, FetchError, PermissionSource};
pub use auto_select::{SelectionPatch, derive_auto_selection};
pub use fetch::ContextFetcher;
pub use hierarchy::{HierarchicalContext, SelectionState};
pub use permissions::{PermissionsContext, PermissionsProvider};
