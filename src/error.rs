//! Errors raised while setting up or running a calculation.
use std::error::Error;
use std::fmt;

/// An error in the inputs to an optical constant calculation.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculationError {
    /// The material label does not name a supported material
    UnsupportedMaterial(String),
    /// A physical parameter is outside its meaningful range
    Configuration(String),
    /// No wavelengths were supplied
    EmptySweep,
}

impl fmt::Display for CalculationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedMaterial(label) => write!(
                f,
                "Unsupported material '{label}' (expected one of: {})",
                crate::material::Material::supported_labels()
            ),
            Self::Configuration(msg) => write!(f, "Invalid configuration: {msg}"),
            Self::EmptySweep => write!(f, "At least one wavelength must be given"),
        }
    }
}

impl Error for CalculationError {}
