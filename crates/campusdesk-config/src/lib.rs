//! # campusdesk Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`api`]: backend API client configuration
//! - [`storage`]: durable settings storage configuration
//!
//! Every config offers `from_env()` and `from_lookup(..)`; the latter takes a
//! lookup closure so tests can feed values without touching the process
//! environment.
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_config::{ApiConfig, StorageConfig};
//!
//! let api = ApiConfig::from_env()?;
//! let storage = StorageConfig::from_env();
//! ```

pub mod api;
pub mod storage;

// Re-export commonly used types at crate root
pub use api::ApiConfig;
pub use storage::StorageConfig;

/// Error raised when a configuration value is present but unusable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    InvalidValue {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("invalid configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

pub(crate) fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(value) if value.trim().is_empty() => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                var,
                expected,
                value,
            }),
    }
}
