//! Option cache configuration.
//!
//! This module provides configuration for the option-list cache loaded from
//! environment variables.

/// Cache configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `CACHE_TTL_SECONDS`: Default TTL for cached option lists in seconds (default: `300`)
/// - `CACHE_PREFIX`: Prefix for all cache keys (default: `campusdesk`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// Default time-to-live for cached items in seconds. `0` disables caching.
    pub default_ttl_seconds: u64,

    /// Prefix for all cache keys.
    pub key_prefix: String,
}

impl CacheConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            default_ttl_seconds: lookup("CACHE_TTL_SECONDS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.default_ttl_seconds),
            key_prefix: lookup("CACHE_PREFIX")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.key_prefix),
        }
    }

    /// Build a prefixed cache key.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let config = CacheConfig::default();
    /// let key = config.prefixed_key("classes:college:3");
    /// // Returns "campusdesk:classes:college:3"
    /// ```
    pub fn prefixed_key(&self, key: &str) -> String {
        format!("{}:{}", self.key_prefix, key)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_seconds: 300,
            key_prefix: "campusdesk".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lookup_defaults_on_garbage() {
        let config = CacheConfig::from_lookup(|key| match key {
            "CACHE_TTL_SECONDS" => Some("forever".into()),
            _ => None,
        });
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn test_prefixed_key() {
        let config = CacheConfig {
            key_prefix: "test".into(),
            ..CacheConfig::default()
        };
        assert_eq!(config.prefixed_key("colleges"), "test:colleges");
    }
}
