//! The optical constant calculator for a single material sample.
use crate::coefficients::DerivedCoefficients;
use crate::material::MaterialSample;
use crate::optics::{OpticalConstants, optical_constants};
use crate::sweep::{OpticalResult, Wavelengths};
use crate::units::Micrometres;
use log::{debug, info};

/// Calculates n and k for a fixed material sample.
///
/// The model coefficients are derived once, when the calculator is created, and every
/// subsequent evaluation depends only on them and the wavelength.
#[derive(Debug, Clone, PartialEq)]
pub struct OpticalConstantCalculator {
    sample: MaterialSample,
    coefficients: DerivedCoefficients,
}

impl OpticalConstantCalculator {
    /// Create a calculator for the given sample and report its band gap
    pub fn new(sample: MaterialSample) -> Self {
        let calculator = Self {
            coefficients: DerivedCoefficients::new(&sample),
            sample,
        };
        calculator.report();

        calculator
    }

    /// The sample this calculator was created for
    pub fn sample(&self) -> &MaterialSample {
        &self.sample
    }

    /// The coefficients derived from the sample
    pub fn coefficients(&self) -> &DerivedCoefficients {
        &self.coefficients
    }

    /// Log the sample parameters and the derived band gap
    fn report(&self) {
        info!(
            "Showing result for {}, x={}, at {}K.",
            self.sample.material,
            self.sample.x,
            self.sample.temperature.value()
        );
        info!(
            "Corresponding band gap: {:.2} meV, cutoff wavelength: {:.2}um.",
            self.coefficients.band_gap().to_millielectronvolts(),
            self.coefficients.cutoff_wavelength().value()
        );
    }

    /// Evaluate the optical constants at a single wavelength (um)
    pub fn evaluate_at(&self, wavelength: f64) -> OpticalConstants {
        optical_constants(
            self.sample.material,
            &self.coefficients,
            Micrometres(wavelength),
        )
    }

    /// Evaluate the optical constants across a sweep, preserving its order.
    ///
    /// A single `f64` can be passed and is treated as a sweep of length one.
    pub fn evaluate<W: Into<Wavelengths>>(&self, wavelengths: W) -> OpticalResult {
        let wavelengths = wavelengths.into();
        let mut result = OpticalResult::with_capacity(wavelengths.len());
        for lambda in wavelengths.iter() {
            let constants = self.evaluate_at(lambda);
            result.push(lambda, constants.n, constants.k.k1, constants.k.k2);
        }
        debug!("Calculated optical constants:\n{}", result.summary());

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{cdte_sample, mct_calculator, mct_sample, wavelengths};
    use crate::optics::Extinction;
    use rstest::rstest;

    #[rstest]
    fn test_evaluate_preserves_length_and_order(
        mct_calculator: OpticalConstantCalculator,
        wavelengths: Wavelengths,
    ) {
        let result = mct_calculator.evaluate(wavelengths.clone());

        assert_eq!(result.len(), wavelengths.len());
        assert_eq!(result.n.len(), wavelengths.len());
        assert_eq!(result.k1.len(), wavelengths.len());
        assert_eq!(result.k2.len(), wavelengths.len());
        assert_eq!(result.wavelengths, wavelengths.as_slice());

        for (i, lambda) in wavelengths.iter().enumerate() {
            let constants = mct_calculator.evaluate_at(lambda);
            assert_eq!(result.n[i], constants.n);
            assert_eq!(result.k1[i], constants.k.k1);
            assert_eq!(result.k2[i], constants.k.k2);
        }
    }

    #[rstest]
    fn test_evaluate_unsorted_sweep(mct_calculator: OpticalConstantCalculator) {
        let sweep = Wavelengths::new(vec![3.0, 1.0, 2.0]).unwrap();
        let result = mct_calculator.evaluate(sweep);
        assert_eq!(result.wavelengths, [3.0, 1.0, 2.0]);
        assert_eq!(result.n[1], mct_calculator.evaluate_at(1.0).n);
    }

    #[rstest]
    fn test_evaluate_scalar(mct_calculator: OpticalConstantCalculator) {
        let result = mct_calculator.evaluate(2.0);
        let constants = mct_calculator.evaluate_at(2.0);

        assert_eq!(result.wavelengths, [2.0]);
        assert_eq!(result.n, [constants.n]);
        assert_eq!(result.k1, [constants.k.k1]);
        assert_eq!(result.k2, [constants.k.k2]);
    }

    #[rstest]
    fn test_evaluate_cdte(cdte_sample: MaterialSample, wavelengths: Wavelengths) {
        let calculator = OpticalConstantCalculator::new(cdte_sample);
        let result = calculator.evaluate(wavelengths);

        assert!(result.k1.iter().all(|&k| k == 0.0));
        assert!(result.k2.iter().all(|&k| k == 0.0));
        assert_eq!(calculator.evaluate_at(2.0).k, Extinction::default());
    }

    #[rstest]
    fn test_band_gap_independent_of_sweep(mct_sample: MaterialSample) {
        let calculator = OpticalConstantCalculator::new(mct_sample);
        let before = *calculator.coefficients();
        calculator.evaluate(Wavelengths::new(vec![1.0, 5.0, 10.0]).unwrap());

        assert_eq!(*calculator.coefficients(), before);
        assert_eq!(calculator.sample(), &mct_sample);
    }
}
