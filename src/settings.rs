//! User settings for mctnk, read from `settings.toml` in the config directory.
use crate::get_mctnk_config_dir;
use crate::input::read_toml;
use crate::log::DEFAULT_LOG_LEVEL;
use crate::plot::PlotFormat;
use anyhow::Result;
use documented::DocumentedFields;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::{Path, PathBuf};

const SETTINGS_FILE_NAME: &str = "settings.toml";

/// First lines of a freshly generated settings file
const SETTINGS_FILE_PREAMBLE: &str = "# mctnk settings
# Every option is shown commented out with its default value.
";

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Location of the user's `settings.toml`
pub fn get_settings_file_path() -> PathBuf {
    get_mctnk_config_dir().join(SETTINGS_FILE_NAME)
}

/// Options which apply to every calculation the program runs
#[derive(Debug, DocumentedFields, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Log level used unless MCTNK_LOG_LEVEL is set
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Whether to save plots of n and k after each calculation
    #[serde(default)]
    pub plot: bool,
    /// The image format for plots ("png" or "svg")
    #[serde(default)]
    pub plot_format: PlotFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            plot: false,
            plot_format: PlotFormat::default(),
        }
    }
}

impl Settings {
    /// Load the user's settings, using defaults when there is no settings file
    pub fn load() -> Result<Settings> {
        Self::load_from_path(&get_settings_file_path())
    }

    fn load_from_path(file_path: &Path) -> Result<Settings> {
        if file_path.is_file() {
            read_toml(file_path)
        } else {
            Ok(Settings::default())
        }
    }

    /// A settings file with every option commented out and preceded by its description
    pub fn default_file_contents() -> String {
        let defaults =
            toml::to_string(&Settings::default()).expect("Settings are always valid TOML");

        let mut out = SETTINGS_FILE_PREAMBLE.to_string();
        for entry in defaults.lines() {
            let Some((key, _)) = entry.split_once('=') else {
                continue;
            };
            let docs = Settings::get_field_docs(key.trim()).expect("Every setting is documented");

            out.push('\n');
            for doc_line in docs.lines() {
                writeln!(out, "# # {}", doc_line.trim()).unwrap();
            }
            writeln!(out, "# {}", entry.trim()).unwrap();
        }

        out
    }
}
