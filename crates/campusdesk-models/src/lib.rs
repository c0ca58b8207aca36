//! # campusdesk Models
//!
//! Domain models and DTOs shared by the context and settings engines.
//!
//! # Modules
//!
//! - [`ids`]: strongly-typed entity IDs
//! - [`options`]: college/class/section option DTOs
//! - [`settings`]: the settings record, updates, and presets
//! - [`users`]: the signed-in user's context and permission payload
//! - [`value_types`]: validated value types (hex colors)

pub mod ids;
pub mod options;
pub mod settings;
pub mod users;
pub mod value_types;

// Re-export commonly used types at crate root for convenience
pub use ids::{ClassId, CollegeId, SectionId, UserId};
pub use options::{ClassOption, CollegeOption, ContextOption, SectionOption};
pub use settings::{
    ColorMode, DEFAULT_PRIMARY_COLOR, FontSize, NavigationLayout, PartialSettings, SettingKey,
    SettingUpdate, SettingsPreset, SettingsState, Theme, builtin_presets, find_preset,
};
pub use users::{PermissionPayload, UserContext};
pub use value_types::{HexColor, ValueTypeError};
