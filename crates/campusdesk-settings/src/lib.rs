//! # campusdesk Settings
//!
//! User interface preferences: a pure reducer, a store that persists to
//! durable storage once it has been mounted, and a projection of the
//! current settings onto a document root.
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_settings::{FileStorage, SettingsProvider, StyleRoot, apply_settings, FixedScheme};
//!
//! let storage = Arc::new(FileStorage::from_config(&StorageConfig::from_env()));
//! let provider = SettingsProvider::mount(storage, DEFAULT_SETTINGS_KEY);
//! provider.update_setting(SettingUpdate::Theme(Theme::Dark));
//!
//! let mut root = StyleRoot::new();
//! apply_settings(&provider.settings(), &mut root, &FixedScheme::light());
//! println!("{}", root);
//! ```

pub mod apply;
pub mod color;
pub mod provider;
pub mod reducer;
pub mod storage;

pub use apply::{
    ColorSchemeProbe, DocumentRoot, FixedScheme, StyleRoot, apply_settings, follow_settings,
};
pub use color::{Hsl, hex_to_hsl};
pub use provider::SettingsProvider;
pub use reducer::{SettingsAction, reduce};
pub use storage::{FileStorage, MemoryStorage, SettingsStorage, StorageError};
