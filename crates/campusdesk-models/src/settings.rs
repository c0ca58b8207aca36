//! UI preference models: the settings record, per-key updates, and presets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value_types::{HexColor, ValueTypeError};

/// Defines a lowercase string enum with the conversions the drawer needs.
macro_rules! setting_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(()),
                }
            }
        }
    };
}

setting_enum!(
    /// Color theme; `System` follows the OS preference when applied.
    Theme { Light => "light", Dark => "dark", System => "system" }
);

setting_enum!(
    /// Root font size step.
    FontSize { Sm => "sm", Md => "md", Lg => "lg" }
);

setting_enum!(
    /// Navigation layout.
    NavigationLayout { Side => "side", Top => "top", Compact => "compact" }
);

setting_enum!(
    /// How strongly the primary color tints surfaces.
    ColorMode { Integrate => "integrate", Apparent => "apparent" }
);

/// The complete settings record. Every field is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsState {
    pub theme: Theme,
    pub font_size: FontSize,
    pub primary_color: HexColor,
    pub navigation: NavigationLayout,
    pub fullscreen: bool,
    pub contrast: bool,
    pub rtl: bool,
    pub color_mode: ColorMode,
}

/// Primary color used when nothing else has been chosen.
pub const DEFAULT_PRIMARY_COLOR: &str = "#2563eb";

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            font_size: FontSize::Md,
            primary_color: HexColor::new_unchecked(DEFAULT_PRIMARY_COLOR),
            navigation: NavigationLayout::Side,
            fullscreen: false,
            contrast: false,
            rtl: false,
            color_mode: ColorMode::Integrate,
        }
    }
}

impl SettingsState {
    /// Shallow-merge the fields present in `values` over `self`.
    pub fn merged(&self, values: &PartialSettings) -> Self {
        Self {
            theme: values.theme.unwrap_or(self.theme),
            font_size: values.font_size.unwrap_or(self.font_size),
            primary_color: values
                .primary_color
                .clone()
                .unwrap_or_else(|| self.primary_color.clone()),
            navigation: values.navigation.unwrap_or(self.navigation),
            fullscreen: values.fullscreen.unwrap_or(self.fullscreen),
            contrast: values.contrast.unwrap_or(self.contrast),
            rtl: values.rtl.unwrap_or(self.rtl),
            color_mode: values.color_mode.unwrap_or(self.color_mode),
        }
    }

    /// Replace the single field named by `update`.
    pub fn with_update(&self, update: SettingUpdate) -> Self {
        let mut next = self.clone();
        match update {
            SettingUpdate::Theme(v) => next.theme = v,
            SettingUpdate::FontSize(v) => next.font_size = v,
            SettingUpdate::PrimaryColor(v) => next.primary_color = v,
            SettingUpdate::Navigation(v) => next.navigation = v,
            SettingUpdate::Fullscreen(v) => next.fullscreen = v,
            SettingUpdate::Contrast(v) => next.contrast = v,
            SettingUpdate::Rtl(v) => next.rtl = v,
            SettingUpdate::ColorMode(v) => next.color_mode = v,
        }
        next
    }

    /// Current value of a setting rendered as text.
    pub fn value_of(&self, key: SettingKey) -> String {
        match key {
            SettingKey::Theme => self.theme.to_string(),
            SettingKey::FontSize => self.font_size.to_string(),
            SettingKey::PrimaryColor => self.primary_color.to_string(),
            SettingKey::Navigation => self.navigation.to_string(),
            SettingKey::Fullscreen => self.fullscreen.to_string(),
            SettingKey::Contrast => self.contrast.to_string(),
            SettingKey::Rtl => self.rtl.to_string(),
            SettingKey::ColorMode => self.color_mode.to_string(),
        }
    }
}

/// A partial settings record; absent fields are left untouched on merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<HexColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<NavigationLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullscreen: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrast: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rtl: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_mode: Option<ColorMode>,
}

/// Names of the settings fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Theme,
    FontSize,
    PrimaryColor,
    Navigation,
    Fullscreen,
    Contrast,
    Rtl,
    ColorMode,
}

impl SettingKey {
    pub const ALL: &'static [SettingKey] = &[
        Self::Theme,
        Self::FontSize,
        Self::PrimaryColor,
        Self::Navigation,
        Self::Fullscreen,
        Self::Contrast,
        Self::Rtl,
        Self::ColorMode,
    ];

    /// Field name as it appears in the persisted record.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::FontSize => "fontSize",
            Self::PrimaryColor => "primaryColor",
            Self::Navigation => "navigation",
            Self::Fullscreen => "fullscreen",
            Self::Contrast => "contrast",
            Self::Rtl => "rtl",
            Self::ColorMode => "colorMode",
        }
    }

    /// Allowed textual values; `None` for free-form keys (the color).
    pub fn allowed_values(&self) -> Option<Vec<&'static str>> {
        match self {
            Self::Theme => Some(Theme::ALL.iter().map(|v| v.as_str()).collect()),
            Self::FontSize => Some(FontSize::ALL.iter().map(|v| v.as_str()).collect()),
            Self::Navigation => Some(NavigationLayout::ALL.iter().map(|v| v.as_str()).collect()),
            Self::ColorMode => Some(ColorMode::ALL.iter().map(|v| v.as_str()).collect()),
            Self::Fullscreen | Self::Contrast | Self::Rtl => Some(vec!["true", "false"]),
            Self::PrimaryColor => None,
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = ValueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "theme" => Ok(Self::Theme),
            "fontsize" => Ok(Self::FontSize),
            "primarycolor" | "color" => Ok(Self::PrimaryColor),
            "navigation" | "nav" => Ok(Self::Navigation),
            "fullscreen" => Ok(Self::Fullscreen),
            "contrast" => Ok(Self::Contrast),
            "rtl" => Ok(Self::Rtl),
            "colormode" => Ok(Self::ColorMode),
            _ => Err(ValueTypeError::UnknownSetting(s.to_string())),
        }
    }
}

/// A typed single-key update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingUpdate {
    Theme(Theme),
    FontSize(FontSize),
    PrimaryColor(HexColor),
    Navigation(NavigationLayout),
    Fullscreen(bool),
    Contrast(bool),
    Rtl(bool),
    ColorMode(ColorMode),
}

impl SettingUpdate {
    pub fn key(&self) -> SettingKey {
        match self {
            Self::Theme(_) => SettingKey::Theme,
            Self::FontSize(_) => SettingKey::FontSize,
            Self::PrimaryColor(_) => SettingKey::PrimaryColor,
            Self::Navigation(_) => SettingKey::Navigation,
            Self::Fullscreen(_) => SettingKey::Fullscreen,
            Self::Contrast(_) => SettingKey::Contrast,
            Self::Rtl(_) => SettingKey::Rtl,
            Self::ColorMode(_) => SettingKey::ColorMode,
        }
    }

    /// Parse textual input for `key`, rejecting values outside its option set.
    pub fn parse(key: SettingKey, value: &str) -> Result<Self, ValueTypeError> {
        let invalid = || ValueTypeError::InvalidSettingValue {
            key: key.as_str().to_string(),
            value: value.to_string(),
        };

        let parse_bool = |v: &str| match v.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" | "1" => Ok(true),
            "false" | "off" | "no" | "0" => Ok(false),
            _ => Err(invalid()),
        };

        match key {
            SettingKey::Theme => value.parse().map(Self::Theme).map_err(|_| invalid()),
            SettingKey::FontSize => value.parse().map(Self::FontSize).map_err(|_| invalid()),
            SettingKey::PrimaryColor => HexColor::new(value.trim()).map(Self::PrimaryColor),
            SettingKey::Navigation => value.parse().map(Self::Navigation).map_err(|_| invalid()),
            SettingKey::Fullscreen => parse_bool(value).map(Self::Fullscreen),
            SettingKey::Contrast => parse_bool(value).map(Self::Contrast),
            SettingKey::Rtl => parse_bool(value).map(Self::Rtl),
            SettingKey::ColorMode => value.parse().map(Self::ColorMode).map_err(|_| invalid()),
        }
    }
}

/// A named partial settings bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPreset {
    pub name: String,
    pub description: String,
    pub values: PartialSettings,
}

impl SettingsPreset {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        values: PartialSettings,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            values,
        }
    }
}

/// Presets offered by the settings drawer.
pub fn builtin_presets() -> Vec<SettingsPreset> {
    let defaults = SettingsState::default();
    vec![
        SettingsPreset::new(
            "default",
            "Light theme, medium text, side navigation",
            PartialSettings {
                theme: Some(defaults.theme),
                font_size: Some(defaults.font_size),
                primary_color: Some(defaults.primary_color),
                navigation: Some(defaults.navigation),
                contrast: Some(defaults.contrast),
                color_mode: Some(defaults.color_mode),
                ..PartialSettings::default()
            },
        ),
        SettingsPreset::new(
            "dark",
            "Dark theme with apparent color tinting",
            PartialSettings {
                theme: Some(Theme::Dark),
                color_mode: Some(ColorMode::Apparent),
                ..PartialSettings::default()
            },
        ),
        SettingsPreset::new(
            "high-contrast",
            "High contrast with large text",
            PartialSettings {
                contrast: Some(true),
                font_size: Some(FontSize::Lg),
                ..PartialSettings::default()
            },
        ),
        SettingsPreset::new(
            "large-text",
            "Large root font size",
            PartialSettings {
                font_size: Some(FontSize::Lg),
                ..PartialSettings::default()
            },
        ),
        SettingsPreset::new(
            "compact",
            "Compact navigation with small text",
            PartialSettings {
                navigation: Some(NavigationLayout::Compact),
                font_size: Some(FontSize::Sm),
                ..PartialSettings::default()
            },
        ),
    ]
}

/// Look up a built-in preset by name (case-insensitive).
pub fn find_preset(name: &str) -> Option<SettingsPreset> {
    builtin_presets()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}
