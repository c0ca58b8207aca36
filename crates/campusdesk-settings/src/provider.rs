//! The settings store and its persistence.
//!
//! The persisted record is read once by [`SettingsProvider::mount`]. Until
//! that read has finished nothing is written, so the defaults a fresh
//! provider starts with can never overwrite a stored record. After mount,
//! every dispatched action writes the new state through to storage.

use campusdesk_models::settings::{
    PartialSettings, SettingUpdate, SettingsPreset, SettingsState,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::reducer::{SettingsAction, reduce};
use crate::storage::{SettingsStorage, StorageError};

pub struct SettingsProvider {
    state: watch::Sender<SettingsState>,
    storage: Arc<dyn SettingsStorage>,
    key: String,
    initialized: AtomicBool,
}

impl std::fmt::Debug for SettingsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsProvider")
            .field("key", &self.key)
            .field("initialized", &self.is_initialized())
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl SettingsProvider {
    /// A provider holding the defaults that has not read storage yet.
    pub fn new(storage: Arc<dyn SettingsStorage>, key: impl Into<String>) -> Self {
        let (state, _) = watch::channel(SettingsState::default());
        Self {
            state,
            storage,
            key: key.into(),
            initialized: AtomicBool::new(false),
        }
    }

    /// Create a provider and load the persisted record.
    pub fn mount(storage: Arc<dyn SettingsStorage>, key: impl Into<String>) -> Self {
        let provider = Self::new(storage, key);
        provider.load();
        provider
    }

    /// Read the persisted record and mark the provider initialized.
    ///
    /// A missing, unreadable or incomplete record leaves the defaults in
    /// place. Calling this again after initialization does nothing.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn load(&self) {
        if self.is_initialized() {
            return;
        }

        match self.storage.get(&self.key) {
            Ok(Some(raw)) => match serde_json::from_str::<SettingsState>(&raw) {
                Ok(stored) => {
                    debug!("Loaded persisted settings");
                    self.transition(SettingsAction::Init(stored));
                }
                Err(e) => warn!(error = %e, "Ignoring unreadable settings record"),
            },
            Ok(None) => debug!("No persisted settings, using defaults"),
            Err(e) => warn!(error = %e, "Failed to read settings storage"),
        }

        self.initialized.store(true, Ordering::Release);
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Current settings.
    pub fn settings(&self) -> SettingsState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SettingsState> {
        self.state.subscribe()
    }

    /// Run `action` through the reducer and write the result through.
    ///
    /// A reset removes the persisted record instead of writing the defaults;
    /// it stays absent until the next change.
    pub fn dispatch(&self, action: SettingsAction) {
        let reset = matches!(action, SettingsAction::Reset);
        self.transition(action);

        if !self.is_initialized() {
            return;
        }

        if reset {
            if let Err(e) = self.storage.remove(&self.key) {
                warn!(key = %self.key, error = %e, "Failed to clear persisted settings");
            }
            return;
        }

        let state = self.settings();
        if let Err(e) = self.persist(&state) {
            warn!(key = %self.key, error = %e, "Failed to persist settings");
        }
    }

    pub fn update_setting(&self, update: SettingUpdate) {
        debug!(setting = %update.key(), "Updating setting");
        self.dispatch(SettingsAction::Update(update));
    }

    pub fn apply_preset(&self, preset: &SettingsPreset) {
        info!(preset = %preset.name, "Applying settings preset");
        self.apply_values(preset.values.clone());
    }

    pub fn apply_values(&self, values: PartialSettings) {
        self.dispatch(SettingsAction::ApplyPreset(values));
    }

    /// Return to the defaults and clear the persisted record.
    pub fn reset_settings(&self) {
        info!("Settings reset to defaults");
        self.dispatch(SettingsAction::Reset);
    }

    fn transition(&self, action: SettingsAction) {
        self.state.send_if_modified(|state| {
            let next = reduce(state, action);
            if *state == next {
                return false;
            }
            *state = next;
            true
        });
    }

    fn persist(&self, state: &SettingsState) -> Result<(), StorageError> {
        let json = serde_json::to_string(state)?;
        self.storage.set(&self.key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use campusdesk_models::settings::{ColorMode, FontSize, NavigationLayout, Theme, find_preset};
    use campusdesk_models::value_types::HexColor;

    const KEY: &str = "campusdesk-settings";

    struct FailingStorage;

    impl SettingsStorage for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Poisoned)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
    }

    fn stored(storage: &MemoryStorage) -> Option<SettingsState> {
        storage
            .get(KEY)
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    #[test]
    fn test_mount_without_record_keeps_defaults_and_writes_nothing() {
        let storage = MemoryStorage::new();
        let provider = SettingsProvider::mount(Arc::new(storage.clone()), KEY);

        assert!(provider.is_initialized());
        assert_eq!(provider.settings(), SettingsState::default());
        assert!(!storage.contains(KEY));
    }

    #[test]
    fn test_nothing_is_persisted_before_mount() {
        let storage = MemoryStorage::new();
        let record = SettingsState {
            theme: Theme::Dark,
            ..SettingsState::default()
        };
        storage.set(KEY, &serde_json::to_string(&record).unwrap()).unwrap();

        let provider = SettingsProvider::new(Arc::new(storage.clone()), KEY);
        provider.update_setting(SettingUpdate::Rtl(true));

        assert_eq!(stored(&storage).unwrap().theme, Theme::Dark);
        assert!(!stored(&storage).unwrap().rtl);
    }

    #[test]
    fn test_round_trip_through_fresh_mount() {
        let colors = ["#2563eb", "#16a34a", "#fff"];

        for &theme in Theme::ALL {
            for &font_size in FontSize::ALL {
                for &navigation in NavigationLayout::ALL {
                    for &color_mode in ColorMode::ALL {
                        for flags in 0u8..8 {
                            let state = SettingsState {
                                theme,
                                font_size,
                                primary_color: HexColor::new(colors[flags as usize % colors.len()])
                                    .unwrap(),
                                navigation,
                                fullscreen: flags & 1 != 0,
                                contrast: flags & 2 != 0,
                                rtl: flags & 4 != 0,
                                color_mode,
                            };

                            let storage = MemoryStorage::new();
                            let provider =
                                SettingsProvider::mount(Arc::new(storage.clone()), KEY);
                            provider.dispatch(SettingsAction::Init(state.clone()));
                            assert_eq!(provider.settings(), state);

                            let remounted =
                                SettingsProvider::mount(Arc::new(storage.clone()), KEY);
                            assert_eq!(remounted.settings(), state);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_stored_invalid_color_falls_back_to_defaults() {
        let storage = MemoryStorage::new();
        let mut record = serde_json::to_value(SettingsState {
            theme: Theme::Dark,
            ..SettingsState::default()
        })
        .unwrap();
        record["primaryColor"] = serde_json::json!("banana");
        storage.set(KEY, &record.to_string()).unwrap();

        let provider = SettingsProvider::mount(Arc::new(storage.clone()), KEY);
        assert_eq!(provider.settings(), SettingsState::default());
    }

    #[test]
    fn test_reset_clears_storage() {
        let storage = MemoryStorage::new();
        let provider = SettingsProvider::mount(Arc::new(storage.clone()), KEY);
        provider.update_setting(SettingUpdate::Contrast(true));
        assert!(storage.contains(KEY));

        provider.reset_settings();

        assert_eq!(provider.settings(), SettingsState::default());
        assert!(!storage.contains(KEY));

        let remounted = SettingsProvider::mount(Arc::new(storage.clone()), KEY);
        assert_eq!(remounted.settings(), SettingsState::default());
    }

    #[test]
    fn test_dispatched_reset_clears_storage() {
        let storage = MemoryStorage::new();
        let provider = SettingsProvider::mount(Arc::new(storage.clone()), KEY);
        provider.update_setting(SettingUpdate::Theme(Theme::Dark));
        assert!(storage.contains(KEY));

        provider.dispatch(SettingsAction::Reset);

        assert_eq!(provider.settings().theme, Theme::Light);
        assert!(!storage.contains(KEY));
        let remounted = SettingsProvider::mount(Arc::new(storage.clone()), KEY);
        assert_eq!(remounted.settings(), SettingsState::default());
    }

    #[test]
    fn test_reset_before_mount_leaves_record() {
        let storage = MemoryStorage::new();
        storage
            .set(KEY, &serde_json::to_string(&SettingsState::default()).unwrap())
            .unwrap();

        let provider = SettingsProvider::new(Arc::new(storage.clone()), KEY);
        provider.dispatch(SettingsAction::Reset);

        assert!(storage.contains(KEY));
    }

    #[test]
    fn test_change_after_reset_is_persisted_again() {
        let storage = MemoryStorage::new();
        let provider = SettingsProvider::mount(Arc::new(storage.clone()), KEY);
        provider.reset_settings();
        provider.update_setting(SettingUpdate::Navigation(
            campusdesk_models::settings::NavigationLayout::Top,
        ));
        assert!(storage.contains(KEY));
    }

    #[test]
    fn test_preset_leaves_unspecified_keys() {
        let storage = MemoryStorage::new();
        let provider = SettingsProvider::mount(Arc::new(storage.clone()), KEY);
        provider.update_setting(SettingUpdate::Rtl(true));
        provider.update_setting(SettingUpdate::PrimaryColor(
            HexColor::new("#dc2626").unwrap(),
        ));

        provider.apply_preset(&find_preset("dark").unwrap());

        let settings = provider.settings();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.color_mode, ColorMode::Apparent);
        assert!(settings.rtl);
        assert_eq!(settings.primary_color, "#dc2626");
        assert_eq!(stored(&storage), Some(settings));
    }

    #[test]
    fn test_corrupt_record_falls_back_to_defaults() {
        let storage = MemoryStorage::new();
        storage.set(KEY, "{not json").unwrap();
        let provider = SettingsProvider::mount(Arc::new(storage.clone()), KEY);
        assert_eq!(provider.settings(), SettingsState::default());
        assert!(provider.is_initialized());
    }

    #[test]
    fn test_incomplete_record_falls_back_wholesale() {
        let storage = MemoryStorage::new();
        storage.set(KEY, r#"{"theme": "dark", "rtl": true}"#).unwrap();
        let provider = SettingsProvider::mount(Arc::new(storage.clone()), KEY);
        assert_eq!(provider.settings(), SettingsState::default());
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let storage = MemoryStorage::new();
        let mut record = serde_json::to_value(SettingsState {
            theme: Theme::System,
            ..SettingsState::default()
        })
        .unwrap();
        record["sidebarWidth"] = serde_json::json!(280);
        storage.set(KEY, &record.to_string()).unwrap();

        let provider = SettingsProvider::mount(Arc::new(storage.clone()), KEY);
        assert_eq!(provider.settings().theme, Theme::System);
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let provider = SettingsProvider::mount(Arc::new(FailingStorage), KEY);
        provider.update_setting(SettingUpdate::Fullscreen(true));
        provider.reset_settings();
        assert_eq!(provider.settings(), SettingsState::default());
    }

    #[test]
    fn test_subscribers_are_notified_of_changes_only() {
        let provider = SettingsProvider::mount(Arc::new(MemoryStorage::new()), KEY);
        let mut rx = provider.subscribe();

        provider.update_setting(SettingUpdate::Theme(Theme::Light));
        assert!(!rx.has_changed().unwrap());

        provider.update_setting(SettingUpdate::Theme(Theme::Dark));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().theme, Theme::Dark);
    }
}
