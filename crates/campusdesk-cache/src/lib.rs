//! # campusdesk Cache
//!
//! Caching utilities for the context option lists.
//!
//! This crate provides:
//! - Cache operations (get, set, delete, invalidate by prefix) with TTLs
//! - Cache configuration from environment variables
//! - Cache key generation scoped by parent selection
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_cache::{CacheConfig, OptionCache, keys};
//!
//! let cache = OptionCache::new(&CacheConfig::from_env());
//! cache.set(&keys::classes::by_college(Some(college)), &classes).await?;
//! let hit: Option<Vec<ClassOption>> = cache.get(&keys::classes::by_college(Some(college))).await;
//! ```

pub mod config;
pub mod keys;
pub mod memory;

pub use config::CacheConfig;
pub use memory::{CacheError, OptionCache};
