//! Command-line front-end.
//!
//! Each subcommand handler takes the [`AppState`](crate::state::AppState)
//! and returns an [`AppError`](campusdesk_core::AppError) on failure; `main`
//! turns that into an exit code.

pub mod permissions;
pub mod select;
pub mod settings;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "campusdesk")]
#[command(about = "campusdesk - context selection and interface settings", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load permissions, sync the College/Class/Section context and print it
    Select(SelectArgs),
    /// Print the normalized permissions of the signed-in user
    Permissions,
    /// Inspect or change interface settings
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Debug, Clone, Default, Args)]
pub struct SelectArgs {
    /// College to select
    #[arg(long)]
    pub college: Option<i64>,

    /// Class to select
    #[arg(long)]
    pub class: Option<i64>,

    /// Section to select
    #[arg(long)]
    pub section: Option<i64>,

    /// Pick each level from a prompt
    #[arg(short = 'i', long, conflicts_with_all = ["college", "class", "section"])]
    pub interactive: bool,

    /// Print the selection state as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show current settings
    Show {
        /// Print the raw persisted record
        #[arg(long)]
        json: bool,
    },
    /// Print the CSS the current settings project onto the document root
    Css {
        /// Resolve the `system` theme as dark
        #[arg(long)]
        prefers_dark: bool,
    },
    /// List presets and the allowed values of every setting
    Options,
    /// Change a single setting, e.g. `set theme dark`
    Set { key: String, value: String },
    /// Apply a named preset
    Preset { name: String },
    /// Clear persisted settings and return to the defaults
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_select() {
        let cli = Cli::try_parse_from(["campusdesk", "select", "--college", "3", "--class", "7"]).unwrap();
        match cli.command {
            Commands::Select(args) => {
                assert_eq!(args.college, Some(3));
                assert_eq!(args.class, Some(7));
                assert!(!args.interactive);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_interactive_conflicts_with_explicit_ids() {
        let result = Cli::try_parse_from(["campusdesk", "select", "-i", "--college", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_settings_set() {
        let cli = Cli::try_parse_from(["campusdesk", "settings", "set", "theme", "dark"]).unwrap();
        match cli.command {
            Commands::Settings(SettingsCommand::Set { key, value }) => {
                assert_eq!(key, "theme");
                assert_eq!(value, "dark");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
