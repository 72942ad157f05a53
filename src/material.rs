//! Materials and the samples they are measured in.
use crate::error::CalculationError;
use crate::units::Kelvin;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};
use unicase::UniCase;

/// A material whose optical constants can be calculated
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, derive_more::Display, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Material {
    /// Cadmium telluride. Treated as non-absorbing.
    #[display("CdTe")]
    CdTe,
    /// Mercury cadmium telluride, Hg(1-x)Cd(x)Te
    #[display("MCT")]
    Mct,
    /// Superlattice. Uses the same absorption model as MCT.
    #[display("SL")]
    Sl,
}

impl Material {
    /// Whether absorption is modelled for this material
    pub fn is_absorbing(self) -> bool {
        !matches!(self, Self::CdTe)
    }

    /// A comma-separated list of the labels of all supported materials
    pub fn supported_labels() -> String {
        Self::iter().join(", ")
    }
}

impl FromStr for Material {
    type Err = CalculationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = UniCase::new(s.trim());
        Self::iter()
            .find(|material| UniCase::new(material.to_string()) == label)
            .ok_or_else(|| CalculationError::UnsupportedMaterial(s.to_string()))
    }
}

impl TryFrom<String> for Material {
    type Error = CalculationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Material> for String {
    fn from(value: Material) -> Self {
        value.to_string()
    }
}

/// A sample of a given material, composition and temperature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialSample {
    /// The material
    pub material: Material,
    /// Cadmium fraction, x, in Hg(1-x)Cd(x)Te
    pub x: f64,
    /// Absolute temperature
    pub temperature: Kelvin,
}

impl MaterialSample {
    /// Create a new [`MaterialSample`].
    ///
    /// No checks are performed on `x` or `temperature`. Use [`MaterialSample::validate`] to
    /// check that they are physically meaningful.
    pub fn new(material: Material, x: f64, temperature: Kelvin) -> Self {
        Self {
            material,
            x,
            temperature,
        }
    }

    /// Create a new [`MaterialSample`] from a material label such as `"MCT"`
    pub fn from_label(label: &str, x: f64, temperature: Kelvin) -> Result<Self, CalculationError> {
        Ok(Self::new(label.parse()?, x, temperature))
    }

    /// Check that the composition fraction lies in [0, 1] and the temperature is positive
    pub fn validate(&self) -> Result<(), CalculationError> {
        if !(0.0..=1.0).contains(&self.x) {
            return Err(CalculationError::Configuration(format!(
                "x must be between 0 and 1 (got {})",
                self.x
            )));
        }

        if !(self.temperature.is_finite() && self.temperature > Kelvin(0.0)) {
            return Err(CalculationError::Configuration(format!(
                "temperature must be a finite number greater than zero (got {})",
                self.temperature
            )));
        }

        Ok(())
    }
}
