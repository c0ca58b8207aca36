//! Settings drawer bindings.
//!
//! The drawer is where free-form user input turns into typed settings
//! updates. Anything that does not parse is rejected here with a
//! validation error; the provider below only ever sees valid values.

use campusdesk_core::AppError;
use campusdesk_models::settings::{
    SettingKey, SettingUpdate, SettingsPreset, SettingsState, builtin_presets, find_preset,
};
use campusdesk_settings::SettingsProvider;
use serde::Serialize;
use std::sync::Arc;

/// One row of the drawer: a setting, its current value and its choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingRow {
    pub key: &'static str,
    pub value: String,
    /// `None` for free-form settings.
    pub allowed: Option<Vec<&'static str>>,
}

#[derive(Debug, Clone)]
pub struct SettingsDrawer {
    provider: Arc<SettingsProvider>,
}

impl SettingsDrawer {
    pub fn new(provider: Arc<SettingsProvider>) -> Self {
        Self { provider }
    }

    pub fn settings(&self) -> SettingsState {
        self.provider.settings()
    }

    pub fn rows(&self) -> Vec<SettingRow> {
        let state = self.provider.settings();
        SettingKey::ALL
            .iter()
            .map(|key| SettingRow {
                key: key.as_str(),
                value: state.value_of(*key),
                allowed: key.allowed_values(),
            })
            .collect()
    }

    pub fn presets(&self) -> Vec<SettingsPreset> {
        builtin_presets()
    }

    /// Parse `key` / `value` input into an update.
    pub fn parse(key: &str, value: &str) -> Result<SettingUpdate, AppError> {
        let key: SettingKey = key.parse().map_err(AppError::validation)?;
        SettingUpdate::parse(key, value).map_err(AppError::validation)
    }

    /// Parse and apply a single setting change.
    pub fn set(&self, key: &str, value: &str) -> Result<SettingsState, AppError> {
        let update = Self::parse(key, value)?;
        self.provider.update_setting(update);
        Ok(self.provider.settings())
    }

    /// Apply a built-in preset by name.
    pub fn apply_preset(&self, name: &str) -> Result<SettingsState, AppError> {
        let preset = find_preset(name).ok_or_else(|| {
            let known: Vec<String> = builtin_presets().into_iter().map(|p| p.name).collect();
            AppError::validation(anyhow::anyhow!(
                "unknown preset '{}' (available: {})",
                name,
                known.join(", ")
            ))
        })?;
        self.provider.apply_preset(&preset);
        Ok(self.provider.settings())
    }

    pub fn reset(&self) -> SettingsState {
        self.provider.reset_settings();
        self.provider.settings()
    }
}
