//! In-process cache client for option lists.
//!
//! Values are stored JSON-serialized, so anything cached must round-trip
//! through serde. Expired entries are dropped lazily on read.

use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, error, instrument};

use crate::CacheConfig;

/// Error type for cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug)]
struct CacheEntry {
    json: String,
    expires_at: Instant,
}

/// Shared, cloneable TTL cache.
#[derive(Clone)]
pub struct OptionCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    default_ttl: Duration,
    prefix: String,
}

impl std::fmt::Debug for OptionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionCache")
            .field("default_ttl", &self.default_ttl)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl OptionCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            default_ttl: Duration::from_secs(config.default_ttl_seconds),
            prefix: config.key_prefix.clone(),
        }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self::new(&CacheConfig {
            default_ttl_seconds: 0,
            ..CacheConfig::default()
        })
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}:{}", self.prefix, key)
    }

    /// Gets a cached value by key.
    ///
    /// Returns `None` if the key is absent, expired, or fails to deserialize.
    #[instrument(skip(self), fields(cache.operation = "GET"))]
    pub async fn get<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let full_key = self.full_key(key);
        let entries = self.entries.read().await;

        match entries.get(&full_key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                debug!(cache.key = %full_key, "Cache hit");
                match serde_json::from_str(&entry.json) {
                    Ok(parsed) => Some(parsed),
                    Err(e) => {
                        error!(cache.key = %full_key, error = %e, "Failed to deserialize cached value");
                        None
                    }
                }
            }
            Some(_) => {
                debug!(cache.key = %full_key, "Cache entry expired");
                None
            }
            None => {
                debug!(cache.key = %full_key, "Cache miss");
                None
            }
        }
    }

    /// Sets a cached value with the default TTL.
    #[instrument(skip(self, value), fields(cache.operation = "SET"))]
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        self.set_with_ttl(key, value, self.default_ttl).await
    }

    /// Sets a cached value with a custom TTL. A zero TTL stores nothing.
    #[instrument(skip(self, value), fields(cache.operation = "SETEX"))]
    pub async fn set_with_ttl<T>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        if ttl.is_zero() {
            return Ok(());
        }

        let json = serde_json::to_string(value)?;
        let full_key = self.full_key(key);
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > Instant::now());
        entries.insert(
            full_key.clone(),
            CacheEntry {
                json,
                expires_at: Instant::now() + ttl,
            },
        );

        debug!(cache.key = %full_key, cache.ttl_secs = %ttl.as_secs(), "Cache set");

        Ok(())
    }

    /// Invalidates (deletes) a cached key.
    #[instrument(skip(self), fields(cache.operation = "DEL"))]
    pub async fn invalidate(&self, key: &str) {
        let full_key = self.full_key(key);
        self.entries.write().await.remove(&full_key);
        debug!(cache.key = %full_key, "Cache invalidated");
    }

    /// Invalidates every key starting with `prefix`; returns how many were removed.
    #[instrument(skip(self), fields(cache.operation = "PREFIX_DEL"))]
    pub async fn invalidate_prefix(&self, prefix: &str) -> u64 {
        let full_prefix = self.full_key(prefix);
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(&full_prefix));
        let deleted = (before - entries.len()) as u64;

        debug!(cache.prefix = %full_prefix, cache.deleted = %deleted, "Prefix invalidation complete");

        deleted
    }

    /// Checks if a live entry exists for the key.
    pub async fn exists(&self, key: &str) -> bool {
        let full_key = self.full_key(key);
        self.entries
            .read()
            .await
            .get(&full_key)
            .is_some_and(|entry| entry.expires_at > Instant::now())
    }
}
