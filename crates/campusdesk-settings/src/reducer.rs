//! Pure settings state transitions.

use campusdesk_models::settings::{PartialSettings, SettingUpdate, SettingsState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    /// Replace the whole state, used once when a persisted record is loaded.
    Init(SettingsState),
    /// Change a single setting.
    Update(SettingUpdate),
    /// Merge the fields present in a preset.
    ApplyPreset(PartialSettings),
    /// Return to the defaults.
    Reset,
}

/// Compute the next state. Total and free of side effects; values are taken
/// as given.
pub fn reduce(state: &SettingsState, action: SettingsAction) -> SettingsState {
    match action {
        SettingsAction::Init(next) => next,
        SettingsAction::Update(update) => state.with_update(update),
        SettingsAction::ApplyPreset(values) => state.merged(&values),
        SettingsAction::Reset => SettingsState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusdesk_models::settings::{ColorMode, FontSize, Theme};
    use campusdesk_models::value_types::HexColor;

    #[test]
    fn test_init_replaces_state() {
        let loaded = SettingsState {
            theme: Theme::Dark,
            rtl: true,
            ..SettingsState::default()
        };
        let next = reduce(&SettingsState::default(), SettingsAction::Init(loaded.clone()));
        assert_eq!(next, loaded);
    }

    #[test]
    fn test_update_changes_one_field() {
        let next = reduce(
            &SettingsState::default(),
            SettingsAction::Update(SettingUpdate::FontSize(FontSize::Lg)),
        );
        assert_eq!(next.font_size, FontSize::Lg);
        assert_eq!(
            next,
            SettingsState {
                font_size: FontSize::Lg,
                ..SettingsState::default()
            }
        );
    }

    #[test]
    fn test_update_does_not_validate_colors() {
        let next = reduce(
            &SettingsState::default(),
            SettingsAction::Update(SettingUpdate::PrimaryColor(HexColor::new_unchecked("nope"))),
        );
        assert_eq!(next.primary_color.as_str(), "nope");
    }

    #[test]
    fn test_preset_merges_present_fields_only() {
        let state = SettingsState {
            primary_color: HexColor::new_unchecked("#16a34a"),
            rtl: true,
            ..SettingsState::default()
        };
        let next = reduce(
            &state,
            SettingsAction::ApplyPreset(PartialSettings {
                theme: Some(Theme::Dark),
                color_mode: Some(ColorMode::Apparent),
                ..PartialSettings::default()
            }),
        );
        assert_eq!(next.theme, Theme::Dark);
        assert_eq!(next.color_mode, ColorMode::Apparent);
        assert_eq!(next.primary_color.as_str(), "#16a34a");
        assert!(next.rtl);
    }

    #[test]
    fn test_reset_returns_defaults() {
        let state = SettingsState {
            theme: Theme::System,
            contrast: true,
            ..SettingsState::default()
        };
        assert_eq!(reduce(&state, SettingsAction::Reset), SettingsState::default());
    }
}
