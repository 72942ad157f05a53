//! The `settings` subcommands, for finding and editing mctnk's `settings.toml`.
use crate::settings::{Settings, get_settings_file_path};
use anyhow::{Context, Result};
use clap::Subcommand;
use std::fs;
use std::path::Path;

/// Ways of inspecting or changing the settings file
#[derive(Subcommand)]
pub enum SettingsSubcommands {
    /// Open settings.toml in a text editor, creating it first if needed
    Edit,
    /// Print the location settings.toml is loaded from
    Path,
    /// Print a commented-out settings.toml listing every option and its default
    DumpDefault,
}

impl SettingsSubcommands {
    /// Run this subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::Edit => {
                let file_path = get_settings_file_path();
                write_default_settings_if_missing(&file_path)?;
                println!("Editing {}", file_path.display());
                edit::edit_file(&file_path).with_context(|| {
                    format!("Could not open {} in an editor", file_path.display())
                })?;
            }
            Self::Path => println!("{}", get_settings_file_path().display()),
            Self::DumpDefault => print!("{}", Settings::default_file_contents()),
        }

        Ok(())
    }
}

/// Write the commented-out defaults to `file_path` unless a file is already there
fn write_default_settings_if_missing(file_path: &Path) -> Result<()> {
    if file_path.is_file() {
        return Ok(());
    }

    if let Some(config_dir) = file_path.parent() {
        fs::create_dir_all(config_dir).with_context(|| {
            format!("Could not create config directory {}", config_dir.display())
        })?;
    }
    fs::write(file_path, Settings::default_file_contents())
        .with_context(|| format!("Could not write {}", file_path.display()))
}
