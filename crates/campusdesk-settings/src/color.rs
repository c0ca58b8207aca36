//! Hex to HSL conversion for the `--primary` custom property.

use campusdesk_models::value_types::HexColor;
use std::fmt;

/// An HSL color with integer components, as written to CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    /// Degrees, `0..360`.
    pub hue: u16,
    /// Percent, `0..=100`.
    pub saturation: u8,
    /// Percent, `0..=100`.
    pub lightness: u8,
}

/// Renders as `"H S% L%"`, the form expected inside `hsl(var(--primary))`.
impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}% {}%", self.hue, self.saturation, self.lightness)
    }
}

/// Convert a hex color to HSL. Returns `None` for malformed input.
pub fn hex_to_hsl(color: &HexColor) -> Option<Hsl> {
    let (r, g, b) = color.rgb()?;
    Some(rgb_to_hsl(r, g, b))
}

fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;
    let delta = max - min;

    if delta == 0.0 {
        return Hsl {
            hue: 0,
            saturation: 0,
            lightness: percent(lightness),
        };
    }

    let saturation = if lightness > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let sector = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    let hue = (sector * 60.0).round() as u16 % 360;

    Hsl {
        hue,
        saturation: percent(saturation),
        lightness: percent(lightness),
    }
}

fn percent(value: f64) -> u8 {
    (value * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hsl(hex: &str) -> Option<String> {
        hex_to_hsl(&HexColor::new_unchecked(hex)).map(|c| c.to_string())
    }

    #[test]
    fn test_default_primary() {
        assert_eq!(hsl("#2563eb").as_deref(), Some("221 83% 53%"));
    }

    #[test]
    fn test_primaries_and_greys() {
        assert_eq!(hsl("#ff0000").as_deref(), Some("0 100% 50%"));
        assert_eq!(hsl("#00ff00").as_deref(), Some("120 100% 50%"));
        assert_eq!(hsl("#0000ff").as_deref(), Some("240 100% 50%"));
        assert_eq!(hsl("#ffffff").as_deref(), Some("0 0% 100%"));
        assert_eq!(hsl("#000000").as_deref(), Some("0 0% 0%"));
        assert_eq!(hsl("#808080").as_deref(), Some("0 0% 50%"));
    }

    #[test]
    fn test_short_form_matches_long_form() {
        assert_eq!(hsl("#f0f"), hsl("#ff00ff"));
        assert_eq!(hsl("#f0f").as_deref(), Some("300 100% 50%"));
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(hsl("2563eb"), None);
        assert_eq!(hsl("#zzzzzz"), None);
        assert_eq!(hsl(""), None);
    }

    #[test]
    fn test_conversion_is_deterministic() {
        assert_eq!(hsl("#16a34a"), hsl("#16a34a"));
    }
}
