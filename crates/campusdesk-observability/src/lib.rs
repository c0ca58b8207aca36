//! campusdesk Observability Module
//!
//! Installs the global `tracing` subscriber:
//! - a compact console layer on stderr (stdout belongs to command output)
//! - daily rolling plain-text and JSON log files when `LOG_DIR` is set
//!
//! # Examples
//!
//! ```no_run
//! use campusdesk_observability::{LoggingConfig, init_tracing};
//!
//! init_tracing(&LoggingConfig::from_env());
//! tracing::info!("ready");
//! ```

pub mod basic_logging;

pub use basic_logging::init_basic_console_logging;

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging configuration.
///
/// # Environment Variables
///
/// - `LOG_LEVEL`: default level for campusdesk crates (default: `info`)
/// - `LOG_DIR`: directory for rolling log files; unset disables file output
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            dir: None,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            level: lookup("LOG_LEVEL")
                .map(|v| v.trim().to_ascii_lowercase())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "info".into()),
            dir: lookup("LOG_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Filter directive applied when `RUST_LOG` is not set.
    pub fn filter_directive(&self) -> String {
        format!(
            "campusdesk={level},campusdesk_context={level},campusdesk_settings={level},\
             campusdesk_cache={level},campusdesk_core={level},reqwest=warn,hyper=warn",
            level = self.level
        )
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.filter_directive()))
    }
}

/// Initialize the global subscriber. Calling it twice is a no-op.
pub fn init_tracing(config: &LoggingConfig) {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(config.env_filter());

    let Some(dir) = config.dir.as_ref() else {
        let _ = tracing_subscriber::registry().with(console_layer).try_init();
        return;
    };

    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!(
            "warning: cannot create log directory {}: {}; logging to console only",
            dir.display(),
            e
        );
        let _ = tracing_subscriber::registry().with(console_layer).try_init();
        return;
    }

    // Errors only, human readable
    let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, "campusdesk.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    // Structured logs
    let json_appender = RollingFileAppender::new(Rotation::DAILY, dir, "campusdesk.json");
    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(config.env_filter());

    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .try_init();
}
