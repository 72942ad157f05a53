//! Code related to the example calculations and the CLI commands for interacting with them.
use super::{CalculationOutputs, OutputOpts, load_settings_and_init_logger, run_calculation_file};
use crate::input::CalculationParameters;
use crate::settings::Settings;
use ::log::info;
use anyhow::{Context, Result, ensure};
use clap::Subcommand;
use include_dir::{Dir, DirEntry, include_dir};
use std::fs;
use std::path::{Path, PathBuf};

/// The directory containing the example calculations.
static EXAMPLES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/demos");

/// The name of the calculation file within each example
const CALCULATION_FILE_NAME: &str = "calculation.toml";

/// The available subcommands for managing example calculations.
#[derive(Subcommand)]
pub enum ExampleSubcommands {
    /// List available examples.
    List,
    /// Provide information about the specified example.
    Info {
        /// The name of the example.
        name: String,
    },
    /// Extract an example calculation to a new directory.
    Extract {
        /// The name of the example to extract.
        name: String,
        /// The destination folder for the example.
        new_path: Option<PathBuf>,
    },
    /// Run an example.
    Run {
        /// The name of the example to run.
        name: String,
        /// Output options
        #[command(flatten)]
        opts: OutputOpts,
    },
}

impl ExampleSubcommands {
    /// Execute the supplied example subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::List => handle_example_list_command(),
            Self::Info { name } => handle_example_info_command(&name)?,
            Self::Extract {
                name,
                new_path: dest,
            } => handle_example_extract_command(&name, dest.as_deref())?,
            Self::Run { name, opts } => {
                handle_example_run_command(&name, &opts, None)?;
            }
        }

        Ok(())
    }
}

/// The names of the available examples
pub fn example_names() -> impl Iterator<Item = &'static str> {
    EXAMPLES_DIR
        .dirs()
        .filter_map(|dir| dir.path().file_name()?.to_str())
}

/// Handle the `example list` command.
fn handle_example_list_command() {
    for name in example_names() {
        println!("{name}");
    }
}

/// Handle the `example info` command.
fn handle_example_info_command(name: &str) -> Result<()> {
    let path: PathBuf = [name, "README.txt"].iter().collect();
    let readme = EXAMPLES_DIR
        .get_file(path)
        .context("Example not found.")?
        .contents_utf8()
        .context("README.txt is not UTF-8 encoded")?;

    println!("{readme}");

    Ok(())
}

/// Handle the `example extract` command
fn handle_example_extract_command(name: &str, dest: Option<&Path>) -> Result<()> {
    let dest = dest.unwrap_or(Path::new(name));
    extract_example(name, dest)
}

/// Extract the specified example to a new directory
pub fn extract_example(name: &str, new_path: &Path) -> Result<()> {
    // Find the subdirectory in EXAMPLES_DIR whose name matches `name`.
    let sub_dir = EXAMPLES_DIR.get_dir(name).context("Example not found.")?;

    ensure!(
        !new_path.exists(),
        "Destination directory {} already exists",
        new_path.display()
    );

    // Copy the contents of the subdirectory to the destination
    fs::create_dir(new_path)?;
    for entry in sub_dir.entries() {
        match entry {
            DirEntry::Dir(_) => panic!("Subdirectories in examples not supported"),
            DirEntry::File(f) => {
                let file_name = f.path().file_name().unwrap();
                let file_path = new_path.join(file_name);
                fs::write(&file_path, f.contents())?;
            }
        }
    }

    Ok(())
}

/// Load the calculation parameters for the named example
pub fn load_example(name: &str) -> Result<CalculationParameters> {
    let path: PathBuf = [name, CALCULATION_FILE_NAME].iter().collect();
    let contents = EXAMPLES_DIR
        .get_file(path)
        .context("Example not found.")?
        .contents_utf8()
        .context("Calculation file is not UTF-8 encoded")?;

    CalculationParameters::from_toml_str(contents)
        .with_context(|| format!("Invalid calculation file for example {name}"))
}

/// Handle the `example run` command.
pub fn handle_example_run_command(
    name: &str,
    opts: &OutputOpts,
    settings: Option<Settings>,
) -> Result<CalculationOutputs> {
    let settings = load_settings_and_init_logger(settings)?;
    let params = load_example(name)?;
    info!("Running example: {name}");

    run_calculation_file(&params, false, opts, &settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use itertools::Itertools;
    use rstest::rstest;
    use tempfile::tempdir;

    #[test]
    fn test_example_names() {
        assert_eq!(
            example_names().sorted().collect_vec(),
            ["cdte", "mct", "sl"]
        );
    }

    #[rstest]
    #[case("cdte", Material::CdTe)]
    #[case("mct", Material::Mct)]
    #[case("sl", Material::Sl)]
    fn test_load_example(#[case] name: &str, #[case] material: Material) {
        let params = load_example(name).unwrap();
        assert_eq!(params.material, material);
        assert!(EXAMPLES_DIR.get_file(format!("{name}/README.txt")).is_some());
    }

    #[test]
    fn test_mct_example_is_reference_driver() {
        let params = load_example("mct").unwrap();
        assert_eq!(params.x, 0.3);
        assert_eq!(params.temperature, 300.0);
        assert!(params.save_to_file);

        let wavelengths = params.wavelengths().unwrap();
        assert_eq!(wavelengths.len(), 100);
        assert_eq!(wavelengths.as_slice()[0], 1.0);
    }

    #[test]
    fn test_load_example_missing() {
        assert!(load_example("does_not_exist").is_err());
    }

    #[test]
    fn test_extract_example() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("mct");
        extract_example("mct", &dest).unwrap();

        let params = CalculationParameters::from_path(&dest.join(CALCULATION_FILE_NAME)).unwrap();
        assert_eq!(params, load_example("mct").unwrap());

        // Refuse to overwrite
        assert!(extract_example("mct", &dest).is_err());
    }
}
