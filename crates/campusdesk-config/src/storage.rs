//! Durable settings storage configuration.
//!
//! # Environment Variables
//!
//! - `CAMPUSDESK_STORAGE_DIR`: directory holding persisted records (default: `storage/settings`)
//! - `CAMPUSDESK_SETTINGS_KEY`: key of the settings record (default: `campusdesk-settings`)

use std::path::PathBuf;

/// Default key under which the settings record is persisted.
pub const DEFAULT_SETTINGS_KEY: &str = "campusdesk-settings";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    pub dir: PathBuf,
    pub settings_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("storage/settings"),
            settings_key: DEFAULT_SETTINGS_KEY.into(),
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            dir: lookup("CAMPUSDESK_STORAGE_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.dir),
            settings_key: lookup("CAMPUSDESK_SETTINGS_KEY")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.settings_key),
        }
    }
}
