//! The command line interface for mctnk.
use crate::calculator::OpticalConstantCalculator;
use crate::input::CalculationParameters;
use crate::input::calculation::check_physical_ranges;
use crate::log;
use crate::material::{Material, MaterialSample};
use crate::output::{create_output_directory, write_results};
use crate::plot::plot_results;
use crate::settings::Settings;
use crate::sweep::{OpticalResult, Wavelengths};
use crate::units::Kelvin;
use ::log::info;
use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};

pub mod example;
use example::ExampleSubcommands;
pub mod settings;
use settings::SettingsSubcommands;

/// The command line interface for mctnk.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Flag to provide the CLI docs as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// Options controlling where and how results are written
#[derive(Args, Default)]
pub struct OutputOpts {
    /// Directory for output files (defaults to the current directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Whether to save plots of n and k
    #[arg(long)]
    pub plot: bool,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Run the calculation described in a calculation file.
    Run {
        /// Path to the calculation file.
        calculation_file: PathBuf,
        /// Don't save results to a CSV file
        #[arg(long)]
        no_save: bool,
        /// Other output options
        #[command(flatten)]
        opts: OutputOpts,
    },
    /// Calculate n and k at the given wavelengths and print them.
    Calculate {
        /// The material (CdTe, MCT or SL)
        #[arg(short, long, default_value = "MCT")]
        material: Material,
        /// Cadmium fraction, x, in Hg(1-x)Cd(x)Te
        #[arg(short, default_value_t = 0.3)]
        x: f64,
        /// Temperature in Kelvin
        #[arg(short, long, default_value_t = 300.0)]
        temperature: f64,
        /// Wavelengths in um
        #[arg(required = true, num_args = 1..)]
        wavelengths: Vec<f64>,
        /// Save results to a CSV file
        #[arg(long)]
        save: bool,
        /// Other output options
        #[command(flatten)]
        opts: OutputOpts,
    },
    /// Manage example calculations.
    Example {
        /// The available subcommands for managing example calculations.
        #[command(subcommand)]
        subcommand: ExampleSubcommands,
    },
    /// Manage the program settings file.
    Settings {
        /// The subcommands for managing the settings file.
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Run {
                calculation_file,
                no_save,
                opts,
            } => handle_run_command(&calculation_file, no_save, &opts, None).map(|_| ()),
            Self::Calculate {
                material,
                x,
                temperature,
                wavelengths,
                save,
                opts,
            } => {
                let sample = MaterialSample::new(material, x, Kelvin(temperature));
                handle_calculate_command(sample, wavelengths, save, &opts, None).map(|_| ())
            }
            Self::Example { subcommand } => subcommand.execute(),
            Self::Settings { subcommand } => subcommand.execute(),
        }
    }
}

/// Parse CLI arguments and start mctnk
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Invoked as: `$ mctnk --markdown-help`
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let Some(command) = cli.command else {
        // Output program help
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(());
    };

    command.execute()
}

/// The files produced by a calculation
#[derive(Debug, Default, PartialEq)]
pub struct CalculationOutputs {
    /// The CSV file containing the results, if saved
    pub result_file: Option<PathBuf>,
    /// The n and k figures, if plotted
    pub plots: Option<(PathBuf, PathBuf)>,
}

/// Load program settings (if not provided) and initialise the logger
fn load_settings_and_init_logger(settings: Option<Settings>) -> Result<Settings> {
    let settings = if let Some(settings) = settings {
        settings
    } else {
        Settings::load().context("Failed to load settings.")?
    };

    if !log::is_logger_initialised() {
        log::init(&settings.log_level).context("Failed to initialise logging.")?;
    }

    Ok(settings)
}

/// Calculate optical constants for a sample and write the requested outputs
fn run_calculation(
    sample: MaterialSample,
    wavelengths: Wavelengths,
    save_to_file: bool,
    opts: &OutputOpts,
    settings: &Settings,
) -> Result<(OpticalResult, CalculationOutputs)> {
    let calculator = OpticalConstantCalculator::new(sample);
    let result = calculator.evaluate(wavelengths);

    let plot = opts.plot || settings.plot;
    if !(save_to_file || plot) {
        return Ok((result, CalculationOutputs::default()));
    }

    let output_dir = opts.output_dir.as_deref().unwrap_or(Path::new("."));
    create_output_directory(output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    let mut outputs = CalculationOutputs::default();
    if save_to_file {
        let file_path = write_results(output_dir, calculator.sample(), &result)?;
        info!("Results saved to {}", file_path.display());
        outputs.result_file = Some(file_path);
    }
    if plot {
        let (n_path, k_path) = plot_results(output_dir, &result, settings.plot_format)?;
        info!("Plots saved to {} and {}", n_path.display(), k_path.display());
        outputs.plots = Some((n_path, k_path));
    }

    Ok((result, outputs))
}

/// Run the calculation described by the given parameters
pub fn run_calculation_file(
    params: &CalculationParameters,
    no_save: bool,
    opts: &OutputOpts,
    settings: &Settings,
) -> Result<CalculationOutputs> {
    let wavelengths = params.wavelengths()?;
    let save_to_file = params.save_to_file && !no_save;
    let (_, outputs) = run_calculation(params.sample(), wavelengths, save_to_file, opts, settings)?;
    info!("Calculation complete!");

    Ok(outputs)
}

/// Handle the `run` command.
pub fn handle_run_command(
    calculation_file: &Path,
    no_save: bool,
    opts: &OutputOpts,
    settings: Option<Settings>,
) -> Result<CalculationOutputs> {
    let settings = load_settings_and_init_logger(settings)?;
    let params = CalculationParameters::from_path(calculation_file)
        .context("Failed to load calculation.")?;
    info!("Loaded calculation from {}", calculation_file.display());

    run_calculation_file(&params, no_save, opts, &settings)
}

/// Handle the `calculate` command.
pub fn handle_calculate_command(
    sample: MaterialSample,
    wavelengths: Vec<f64>,
    save: bool,
    opts: &OutputOpts,
    settings: Option<Settings>,
) -> Result<CalculationOutputs> {
    let settings = load_settings_and_init_logger(settings)?;
    let wavelengths = Wavelengths::new(wavelengths)?;
    check_physical_ranges(&sample, &wavelengths, false)?;
    let (result, outputs) = run_calculation(sample, wavelengths, save, opts, &settings)?;

    println!(
        "{:>16} {:>22} {:>22} {:>22}",
        "Wavelength(um)", "n", "k1 (Urbach Zone)", "k2 (Intrinsic Zone)"
    );
    for (lambda, n, k1, k2) in result.rows() {
        println!("{lambda:>16} {n:>22.15} {k1:>22.15e} {k2:>22.15e}");
    }

    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::mct_sample;
    use rstest::rstest;
    use tempfile::tempdir;

    fn quiet_settings() -> Settings {
        Settings {
            log_level: "off".into(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_calculate_command() {
        let cli = Cli::try_parse_from([
            "mctnk", "calculate", "-m", "sl", "-x", "0.25", "-t", "77", "2.0", "3.5",
        ])
        .unwrap();
        let Some(Commands::Calculate {
            material,
            x,
            temperature,
            wavelengths,
            save,
            ..
        }) = cli.command
        else {
            panic!("Expected calculate command");
        };

        assert_eq!(material, Material::Sl);
        assert_eq!(x, 0.25);
        assert_eq!(temperature, 77.0);
        assert_eq!(wavelengths, [2.0, 3.5]);
        assert!(!save);
    }

    #[test]
    fn test_parse_calculate_unsupported_material() {
        assert!(Cli::try_parse_from(["mctnk", "calculate", "-m", "GaAs", "2.0"]).is_err());
    }

    #[rstest]
    fn test_run_calculation_no_outputs(mct_sample: MaterialSample) {
        let dir = tempdir().unwrap();
        let opts = OutputOpts {
            output_dir: Some(dir.path().join("unused")),
            plot: false,
        };

        let (result, outputs) =
            run_calculation(mct_sample, Wavelengths::single(2.0), false, &opts, &quiet_settings())
                .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(outputs, CalculationOutputs::default());
        assert!(!dir.path().join("unused").exists());
    }

    #[rstest]
    fn test_run_calculation_saves_results(mct_sample: MaterialSample) {
        let dir = tempdir().unwrap();
        let opts = OutputOpts {
            output_dir: Some(dir.path().join("out")),
            plot: false,
        };
        let wavelengths = Wavelengths::new(vec![1.0, 2.0]).unwrap();

        let (_, outputs) =
            run_calculation(mct_sample, wavelengths, true, &opts, &quiet_settings()).unwrap();
        assert_eq!(
            outputs.result_file,
            Some(dir.path().join("out").join("result.csv"))
        );
        assert!(outputs.plots.is_none());
    }
}
