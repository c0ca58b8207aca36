//! Strongly-typed value types for settings primitives.
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_models::value_types::HexColor;
//!
//! let color: HexColor = "#2563eb".parse().unwrap();
//! assert_eq!(color.rgb(), Some((0x25, 0x63, 0xeb)));
//!
//! // Invalid colors fail to parse
//! assert!("blue".parse::<HexColor>().is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for value type parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueTypeError {
    /// The color is not a `#rgb` / `#rrggbb` hex string.
    InvalidHexColor(String),
    /// The setting key is unknown.
    UnknownSetting(String),
    /// The value is not one of the allowed values for the setting.
    InvalidSettingValue { key: String, value: String },
}

impl std::error::Error for ValueTypeError {}

impl fmt::Display for ValueTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHexColor(msg) => write!(f, "Invalid hex color: {}", msg),
            Self::UnknownSetting(key) => write!(f, "Unknown setting '{}'", key),
            Self::InvalidSettingValue { key, value } => {
                write!(f, "Invalid value '{}' for setting '{}'", value, key)
            }
        }
    }
}

// ============================================================================
// HexColor
// ============================================================================

/// A CSS hex color such as `#2563eb` or `#fff`.
///
/// Deserialization validates, so a persisted record with a malformed color
/// is rejected as a whole. Only [`HexColor::new_unchecked`] can carry an
/// arbitrary string; consumers that need the channels go through
/// [`HexColor::rgb`], which returns `None` for anything malformed.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Create a new HexColor, validating the format.
    pub fn new(color: impl Into<String>) -> Result<Self, ValueTypeError> {
        let color = color.into();
        if parse_rgb(&color).is_none() {
            return Err(ValueTypeError::InvalidHexColor(format!(
                "'{}' is not a #rgb or #rrggbb color",
                color
            )));
        }
        Ok(Self(color))
    }

    /// Create a HexColor without validation.
    #[inline]
    pub fn new_unchecked(color: impl Into<String>) -> Self {
        Self(color.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The red, green and blue channels, or `None` if malformed.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_rgb(&self.0)
    }
}

fn parse_rgb(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match hex.len() {
        3 => {
            let mut channels = hex.chars().map(|c| {
                let v = c.to_digit(16).unwrap_or(0) as u8;
                v * 17
            });
            Some((channels.next()?, channels.next()?, channels.next()?))
        }
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some((channel(0)?, channel(2)?, channel(4)?))
        }
        _ => None,
    }
}

impl fmt::Debug for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HexColor({})", self.0)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HexColor {
    type Err = ValueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ValueTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl AsRef<str> for HexColor {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for HexColor {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for HexColor {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
