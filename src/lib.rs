//! Common functionality for mctnk.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod calculator;
pub mod cli;
pub mod coefficients;
pub mod error;
pub mod input;
pub mod log;
pub mod material;
pub mod optics;
pub mod output;
pub mod plot;
pub mod settings;
pub mod sweep;
pub mod units;

#[cfg(test)]
mod fixture;

/// Get the directory where the program's configuration files are stored.
///
/// Falls back to the current directory if the platform has no config directory.
pub fn get_mctnk_config_dir() -> PathBuf {
    let Some(mut dir) = dirs::config_dir() else {
        return PathBuf::from(".");
    };
    dir.push("mctnk");

    dir
}
