//! Projection of settings onto a document root.
//!
//! [`apply_settings`] is deterministic: the same state and color scheme
//! always produce the same classes, properties and attributes, so it can be
//! re-run on every change without tracking what was set before.

use campusdesk_models::settings::{ColorMode, FontSize, SettingsState, Theme};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::color::hex_to_hsl;

pub const DARK_CLASS: &str = "dark";
pub const HIGH_CONTRAST_CLASS: &str = "high-contrast";
pub const PRIMARY_PROPERTY: &str = "--primary";
pub const OPACITY_PROPERTY: &str = "--color-opacity";
pub const STRENGTH_PROPERTY: &str = "--color-strength";

/// The mutable surface settings are projected onto.
pub trait DocumentRoot {
    fn set_class(&mut self, class: &str, enabled: bool);
    fn set_property(&mut self, name: &str, value: &str);
    fn set_attribute(&mut self, name: &str, value: &str);
    fn set_font_size(&mut self, size: &str);
}

/// Answers whether the environment prefers a dark color scheme.
pub trait ColorSchemeProbe {
    fn prefers_dark(&self) -> bool;
}

/// A probe with a fixed answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedScheme {
    pub dark: bool,
}

impl FixedScheme {
    pub fn light() -> Self {
        Self { dark: false }
    }

    pub fn dark() -> Self {
        Self { dark: true }
    }
}

impl ColorSchemeProbe for FixedScheme {
    fn prefers_dark(&self) -> bool {
        self.dark
    }
}

fn font_size_px(size: FontSize) -> &'static str {
    match size {
        FontSize::Sm => "14px",
        FontSize::Md => "16px",
        FontSize::Lg => "18px",
    }
}

fn color_mode_values(mode: ColorMode) -> (&'static str, &'static str) {
    match mode {
        ColorMode::Integrate => ("0.08", "0.6"),
        ColorMode::Apparent => ("0.16", "1"),
    }
}

/// Write `state` onto `root`.
///
/// An unparseable primary color leaves `--primary` as it was.
pub fn apply_settings(
    state: &SettingsState,
    root: &mut dyn DocumentRoot,
    scheme: &dyn ColorSchemeProbe,
) {
    let dark = match state.theme {
        Theme::Dark => true,
        Theme::Light => false,
        Theme::System => scheme.prefers_dark(),
    };
    root.set_class(DARK_CLASS, dark);
    root.set_class(HIGH_CONTRAST_CLASS, state.contrast);

    let (opacity, strength) = color_mode_values(state.color_mode);
    root.set_property(OPACITY_PROPERTY, opacity);
    root.set_property(STRENGTH_PROPERTY, strength);

    root.set_attribute("dir", if state.rtl { "rtl" } else { "ltr" });

    match hex_to_hsl(&state.primary_color) {
        Some(hsl) => root.set_property(PRIMARY_PROPERTY, &hsl.to_string()),
        None => warn!(color = %state.primary_color, "Invalid primary color, keeping previous value"),
    }

    root.set_font_size(font_size_px(state.font_size));

    debug!(theme = %state.theme, dark, contrast = state.contrast, "Settings applied");
}

/// Apply the current value of `rx`, then re-apply on every change.
///
/// Returns the root once the sending side is gone.
pub async fn follow_settings<R: DocumentRoot>(
    mut rx: watch::Receiver<SettingsState>,
    mut root: R,
    scheme: &(dyn ColorSchemeProbe + Sync),
) -> R {
    loop {
        let state = rx.borrow_and_update().clone();
        apply_settings(&state, &mut root, scheme);

        if rx.changed().await.is_err() {
            break;
        }
    }
    root
}

/// In-memory document root that renders as a CSS block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRoot {
    classes: BTreeSet<String>,
    properties: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    font_size: Option<String>,
}

impl StyleRoot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn font_size(&self) -> Option<&str> {
        self.font_size.as_deref()
    }
}

impl DocumentRoot for StyleRoot {
    fn set_class(&mut self, class: &str, enabled: bool) {
        if enabled {
            self.classes.insert(class.to_string());
        } else {
            self.classes.remove(class);
        }
    }

    fn set_property(&mut self, name: &str, value: &str) {
        self.properties.insert(name.to_string(), value.to_string());
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    fn set_font_size(&mut self, size: &str) {
        self.font_size = Some(size.to_string());
    }
}

/// `:root.dark[dir="ltr"] { font-size: 16px; --primary: ...; }`
impl fmt::Display for StyleRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(":root")?;
        for class in &self.classes {
            write!(f, ".{}", class)?;
        }
        for (name, value) in &self.attributes {
            write!(f, "[{}=\"{}\"]", name, value)?;
        }
        f.write_str(" {\n")?;
        if let Some(size) = &self.font_size {
            writeln!(f, "  font-size: {};", size)?;
        }
        for (name, value) in &self.properties {
            writeln!(f, "  {}: {};", name, value)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusdesk_models::value_types::HexColor;

    fn applied(state: &SettingsState, scheme: FixedScheme) -> StyleRoot {
        let mut root = StyleRoot::new();
        apply_settings(state, &mut root, &scheme);
        root
    }

    #[test]
    fn test_defaults() {
        let root = applied(&SettingsState::default(), FixedScheme::dark());
        assert!(!root.has_class(DARK_CLASS));
        assert!(!root.has_class(HIGH_CONTRAST_CLASS));
        assert_eq!(root.property(OPACITY_PROPERTY), Some("0.08"));
        assert_eq!(root.property(STRENGTH_PROPERTY), Some("0.6"));
        assert_eq!(root.attribute("dir"), Some("ltr"));
        assert_eq!(root.property(PRIMARY_PROPERTY), Some("221 83% 53%"));
        assert_eq!(root.font_size(), Some("16px"));
    }

    #[test]
    fn test_dark_contrast_rtl_apparent_large() {
        let state = SettingsState {
            theme: Theme::Dark,
            contrast: true,
            rtl: true,
            color_mode: ColorMode::Apparent,
            font_size: FontSize::Lg,
            ..SettingsState::default()
        };
        let root = applied(&state, FixedScheme::light());
        assert!(root.has_class(DARK_CLASS));
        assert!(root.has_class(HIGH_CONTRAST_CLASS));
        assert_eq!(root.property(OPACITY_PROPERTY), Some("0.16"));
        assert_eq!(root.property(STRENGTH_PROPERTY), Some("1"));
        assert_eq!(root.attribute("dir"), Some("rtl"));
        assert_eq!(root.font_size(), Some("18px"));
    }

    #[test]
    fn test_system_theme_follows_probe() {
        let state = SettingsState {
            theme: Theme::System,
            ..SettingsState::default()
        };
        assert!(applied(&state, FixedScheme::dark()).has_class(DARK_CLASS));
        assert!(!applied(&state, FixedScheme::light()).has_class(DARK_CLASS));
    }

    #[test]
    fn test_classes_are_removed_when_turned_off() {
        let mut root = StyleRoot::new();
        let on = SettingsState {
            theme: Theme::Dark,
            contrast: true,
            ..SettingsState::default()
        };
        apply_settings(&on, &mut root, &FixedScheme::light());
        apply_settings(&SettingsState::default(), &mut root, &FixedScheme::light());
        assert!(!root.has_class(DARK_CLASS));
        assert!(!root.has_class(HIGH_CONTRAST_CLASS));
    }

    #[test]
    fn test_invalid_primary_keeps_previous_value() {
        let mut root = StyleRoot::new();
        apply_settings(&SettingsState::default(), &mut root, &FixedScheme::light());

        let broken = SettingsState {
            primary_color: HexColor::new_unchecked("teal"),
            font_size: FontSize::Sm,
            ..SettingsState::default()
        };
        apply_settings(&broken, &mut root, &FixedScheme::light());

        assert_eq!(root.property(PRIMARY_PROPERTY), Some("221 83% 53%"));
        assert_eq!(root.font_size(), Some("14px"));
    }

    #[test]
    fn test_projection_is_deterministic() {
        let state = SettingsState {
            theme: Theme::System,
            rtl: true,
            ..SettingsState::default()
        };
        assert_eq!(
            applied(&state, FixedScheme::dark()),
            applied(&state, FixedScheme::dark())
        );
    }

    #[test]
    fn test_style_root_renders_css() {
        let state = SettingsState {
            theme: Theme::Dark,
            ..SettingsState::default()
        };
        let css = applied(&state, FixedScheme::light()).to_string();
        assert_eq!(
            css,
            ":root.dark[dir=\"ltr\"] {\n  font-size: 16px;\n  --color-opacity: 0.08;\n  --color-strength: 0.6;\n  --primary: 221 83% 53%;\n}"
        );
    }

    #[tokio::test]
    async fn test_follow_settings_applies_latest_value() {
        let (tx, rx) = watch::channel(SettingsState::default());
        tx.send_modify(|s| s.theme = Theme::Dark);
        tx.send_modify(|s| s.font_size = FontSize::Sm);
        drop(tx);

        let root = follow_settings(rx, StyleRoot::new(), &FixedScheme::light()).await;

        assert!(root.has_class(DARK_CLASS));
        assert_eq!(root.font_size(), Some("14px"));
    }
}
