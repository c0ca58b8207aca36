use campusdesk_core::AppError;
use campusdesk_models::settings::SettingsState;
use campusdesk_settings::{FixedScheme, StyleRoot, apply_settings};

use super::SettingsCommand;
use crate::drawer::SettingsDrawer;
use crate::state::AppState;

pub fn handle_settings(state: &AppState, command: SettingsCommand) -> Result<(), AppError> {
    let drawer = state.drawer();

    match command {
        SettingsCommand::Show { json } => {
            if json {
                let record =
                    serde_json::to_string_pretty(&drawer.settings()).map_err(AppError::internal)?;
                println!("{}", record);
            } else {
                print_rows(&drawer);
            }
        }
        SettingsCommand::Css { prefers_dark } => {
            println!("{}", render_css(&drawer.settings(), prefers_dark));
        }
        SettingsCommand::Options => print_options(&drawer),
        SettingsCommand::Set { key, value } => {
            let settings = drawer.set(&key, &value)?;
            println!("✅ Updated {} = {}", key, value);
            println!("{}", render_css(&settings, false));
        }
        SettingsCommand::Preset { name } => {
            let settings = drawer.apply_preset(&name)?;
            println!("✅ Applied preset '{}'", name);
            println!("{}", render_css(&settings, false));
        }
        SettingsCommand::Reset => {
            drawer.reset();
            println!(
                "✅ Settings reset; cleared '{}'",
                state.storage_config.settings_key
            );
        }
    }

    Ok(())
}

/// The CSS block the given settings project onto a fresh document root.
pub fn render_css(settings: &SettingsState, prefers_dark: bool) -> String {
    let mut root = StyleRoot::new();
    apply_settings(settings, &mut root, &FixedScheme { dark: prefers_dark });
    root.to_string()
}

fn print_rows(drawer: &SettingsDrawer) {
    for row in drawer.rows() {
        println!("{:<14} {}", row.key, row.value);
    }
}

fn print_options(drawer: &SettingsDrawer) {
    println!("Settings:");
    for row in drawer.rows() {
        let allowed = row
            .allowed
            .map(|values| values.join(" | "))
            .unwrap_or_else(|| "#rgb or #rrggbb".to_string());
        println!("  {:<14} {}", row.key, allowed);
    }

    println!("\nPresets:");
    for preset in drawer.presets() {
        println!("  {:<14} {}", preset.name, preset.description);
    }
}
