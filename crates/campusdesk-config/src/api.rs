//! Backend API client configuration.
//!
//! # Environment Variables
//!
//! - `CAMPUSDESK_API_URL`: base URL of the REST backend (default: `http://localhost:3000`)
//! - `CAMPUSDESK_API_TOKEN`: optional bearer token sent with every request
//! - `CAMPUSDESK_API_TIMEOUT_SECS`: per-request timeout (default: `10`, range 1-300)

use std::time::Duration;
use validator::Validate;

use crate::{ConfigError, parse_var};

#[derive(Clone, Validate)]
pub struct ApiConfig {
    #[validate(url)]
    pub base_url: String,

    pub token: Option<String>,

    #[validate(range(min = 1, max = 300))]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".into(),
            token: None,
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            base_url: lookup("CAMPUSDESK_API_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_url),
            token: lookup("CAMPUSDESK_API_TOKEN").filter(|v| !v.trim().is_empty()),
            timeout_secs: parse_var(
                &lookup,
                "CAMPUSDESK_API_TIMEOUT_SECS",
                "a whole number of seconds",
                defaults.timeout_secs,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Join a path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
