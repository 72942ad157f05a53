//! Fixtures for tests
use crate::calculator::OpticalConstantCalculator;
use crate::material::{Material, MaterialSample};
use crate::sweep::Wavelengths;
use crate::units::Kelvin;
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

/// Hg(0.7)Cd(0.3)Te at room temperature
#[fixture]
pub fn mct_sample() -> MaterialSample {
    MaterialSample::new(Material::Mct, 0.3, Kelvin(300.0))
}

/// CdTe at liquid-nitrogen temperature
#[fixture]
pub fn cdte_sample() -> MaterialSample {
    MaterialSample::new(Material::CdTe, 1.0, Kelvin(77.0))
}

/// A calculator for [`mct_sample`]
#[fixture]
pub fn mct_calculator(mct_sample: MaterialSample) -> OpticalConstantCalculator {
    OpticalConstantCalculator::new(mct_sample)
}

/// A short sweep crossing the band edge of [`mct_sample`]
#[fixture]
pub fn wavelengths() -> Wavelengths {
    Wavelengths::new(vec![1.0, 2.0, 3.5, 4.0, 5.0, 10.0]).unwrap()
}
