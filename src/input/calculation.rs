//! Defines the `CalculationParameters` struct, which represents the contents of a calculation file.
use crate::error::CalculationError;
use crate::input::{input_err_msg, read_toml};
use crate::material::{Material, MaterialSample};
use crate::sweep::{WavelengthSpec, Wavelengths};
use crate::units::Kelvin;
use anyhow::{Context, Result};
use log::warn;
use serde::Deserialize;
use std::path::Path;

macro_rules! define_param_default {
    ($name:ident, $type: ty, $value: expr) => {
        fn $name() -> $type {
            $value
        }
    };
}

define_param_default!(default_save_to_file, bool, true);

/// Represents the contents of a calculation file.
#[derive(Debug, Deserialize, PartialEq)]
pub struct CalculationParameters {
    /// The material to calculate optical constants for
    pub material: Material,
    /// Cadmium fraction, x, in Hg(1-x)Cd(x)Te
    pub x: f64,
    /// Absolute temperature (K)
    pub temperature: f64,
    /// The wavelengths (um) to evaluate at
    pub wavelengths: WavelengthSpec,
    /// Whether to save the results to a CSV file
    #[serde(default = "default_save_to_file")]
    pub save_to_file: bool,
    /// Whether physically meaningless parameters are an error rather than a warning
    #[serde(default)]
    pub strict: bool,
}

impl CalculationParameters {
    /// Read a calculation file from the specified path.
    ///
    /// # Arguments
    ///
    /// * `file_path` - Path to the calculation file
    ///
    /// # Returns
    ///
    /// The file contents as a [`CalculationParameters`] struct or an error if the file is invalid
    pub fn from_path(file_path: &Path) -> Result<CalculationParameters> {
        let params: CalculationParameters = read_toml(file_path)?;
        params
            .validate()
            .with_context(|| input_err_msg(file_path))?;

        Ok(params)
    }

    /// Parse calculation parameters from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<CalculationParameters> {
        let params: CalculationParameters = toml::from_str(contents)?;
        params.validate()?;

        Ok(params)
    }

    /// The material sample described by these parameters
    pub fn sample(&self) -> MaterialSample {
        MaterialSample::new(self.material, self.x, Kelvin(self.temperature))
    }

    /// The wavelengths to evaluate at
    pub fn wavelengths(&self) -> Result<Wavelengths> {
        Ok(self.wavelengths.to_wavelengths()?)
    }

    /// Validate parameters after reading in file.
    ///
    /// The wavelength sweep must be non-empty. Out-of-range physical parameters are reported as
    /// warnings, or as errors if `strict` is set.
    fn validate(&self) -> Result<()> {
        let wavelengths = self.wavelengths()?;
        check_physical_ranges(&self.sample(), &wavelengths, self.strict)?;

        Ok(())
    }
}

/// Check that a sample and sweep are physically meaningful.
///
/// Problems are logged as warnings, unless `strict` is set, in which case the first one is
/// returned as an error.
pub fn check_physical_ranges(
    sample: &MaterialSample,
    wavelengths: &Wavelengths,
    strict: bool,
) -> Result<(), CalculationError> {
    for check in [sample.validate(), wavelengths.validate()] {
        if let Err(err) = check {
            if strict {
                return Err(err);
            }
            warn!("{err}. Results may not be physically meaningful.");
        }
    }

    Ok(())
}
