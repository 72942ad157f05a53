//! Wavelength sweeps and the results of evaluating a sample across them.
use crate::error::CalculationError;
use itertools::{Itertools, izip};
use serde::Deserialize;

/// An ordered, non-empty sequence of wavelengths in um.
///
/// A single wavelength is just a sweep of length one.
#[derive(Debug, Clone, PartialEq)]
pub struct Wavelengths(Vec<f64>);

impl Wavelengths {
    /// Create a sweep from the given wavelengths, which must not be empty
    pub fn new(values: Vec<f64>) -> Result<Self, CalculationError> {
        if values.is_empty() {
            return Err(CalculationError::EmptySweep);
        }

        Ok(Self(values))
    }

    /// A sweep containing a single wavelength
    pub fn single(value: f64) -> Self {
        Self(vec![value])
    }

    /// The wavelengths as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// The number of wavelengths in the sweep
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sweep is empty (never true for a constructed sweep)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the wavelengths in order
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Check that every wavelength is finite and positive
    pub fn validate(&self) -> Result<(), CalculationError> {
        match self.iter().find(|lambda| !(lambda.is_finite() && *lambda > 0.0)) {
            Some(lambda) => Err(CalculationError::Configuration(format!(
                "wavelengths must be finite numbers greater than zero (got {lambda})"
            ))),
            None => Ok(()),
        }
    }
}

impl From<f64> for Wavelengths {
    fn from(value: f64) -> Self {
        Self::single(value)
    }
}

impl TryFrom<Vec<f64>> for Wavelengths {
    type Error = CalculationError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&[f64]> for Wavelengths {
    type Error = CalculationError;

    fn try_from(value: &[f64]) -> Result<Self, Self::Error> {
        Self::new(value.to_vec())
    }
}

/// A half-open range of evenly spaced wavelengths, `[start, stop)`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WavelengthRange {
    /// First wavelength (um)
    pub start: f64,
    /// Wavelength at which to stop, exclusive (um)
    pub stop: f64,
    /// Spacing between wavelengths (um)
    pub step: f64,
}

impl WavelengthRange {
    /// Generate the wavelengths in this range.
    ///
    /// Samples are `start + i * step` for `i` in `0..ceil((stop - start) / step)`, so the stop
    /// value itself is not included.
    pub fn to_wavelengths(&self) -> Result<Wavelengths, CalculationError> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(CalculationError::Configuration(format!(
                "wavelength step must be a finite number greater than zero (got {})",
                self.step
            )));
        }
        if !(self.start.is_finite() && self.stop.is_finite()) {
            return Err(CalculationError::Configuration(
                "wavelength range bounds must be finite".into(),
            ));
        }

        let count = ((self.stop - self.start) / self.step).ceil().max(0.0) as usize;
        Wavelengths::new(
            (0..count)
                .map(|i| self.start + i as f64 * self.step)
                .collect(),
        )
    }
}

/// The ways wavelengths can be specified in a calculation file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WavelengthSpec {
    /// A single wavelength
    Single(f64),
    /// An explicit list of wavelengths
    List(Vec<f64>),
    /// Evenly spaced wavelengths
    Range(WavelengthRange),
}

impl WavelengthSpec {
    /// Expand into a concrete sweep
    pub fn to_wavelengths(&self) -> Result<Wavelengths, CalculationError> {
        match self {
            Self::Single(value) => Ok(Wavelengths::single(*value)),
            Self::List(values) => Wavelengths::new(values.clone()),
            Self::Range(range) => range.to_wavelengths(),
        }
    }
}

/// The optical constants of a sample across a wavelength sweep.
///
/// All sequences have the same length and are index-aligned with `wavelengths`.
#[derive(Debug, Clone, PartialEq)]
pub struct OpticalResult {
    /// Wavelengths (um)
    pub wavelengths: Vec<f64>,
    /// Real part of the refractive index
    pub n: Vec<f64>,
    /// Extinction coefficient from the Urbach tail
    pub k1: Vec<f64>,
    /// Extinction coefficient from intrinsic absorption
    pub k2: Vec<f64>,
}

impl OpticalResult {
    /// Create an empty result with room for `capacity` samples
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            wavelengths: Vec::with_capacity(capacity),
            n: Vec::with_capacity(capacity),
            k1: Vec::with_capacity(capacity),
            k2: Vec::with_capacity(capacity),
        }
    }

    /// Append the values for one wavelength
    pub fn push(&mut self, wavelength: f64, n: f64, k1: f64, k2: f64) {
        self.wavelengths.push(wavelength);
        self.n.push(n);
        self.k1.push(k1);
        self.k2.push(k2);
    }

    /// The number of samples
    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    /// Whether there are no samples
    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }

    /// Iterate over `(wavelength, n, k1, k2)` rows
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64, f64, f64)> + '_ {
        izip!(&self.wavelengths, &self.n, &self.k1, &self.k2)
            .map(|(&lambda, &n, &k1, &k2)| (lambda, n, k1, k2))
    }

    /// The `(wavelength, n)` series
    pub fn refractive_index_series(&self) -> Vec<(f64, f64)> {
        self.wavelengths
            .iter()
            .copied()
            .zip(self.n.iter().copied())
            .collect()
    }

    /// The `(wavelength, k1, k2)` series
    pub fn extinction_series(&self) -> Vec<(f64, f64, f64)> {
        self.rows()
            .map(|(lambda, _, k1, k2)| (lambda, k1, k2))
            .collect()
    }

    /// Format the sequences as in a short, human-readable summary
    pub fn summary(&self) -> String {
        let fmt_values = |values: &[f64]| values.iter().map(|v| format!("{v:e}")).join(", ");
        format!(
            "n: [{}]\nk1: [{}]\nk2: [{}]",
            fmt_values(&self.n),
            fmt_values(&self.k1),
            fmt_values(&self.k2)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[test]
    fn test_wavelengths_empty() {
        assert_eq!(Wavelengths::new(Vec::new()), Err(CalculationError::EmptySweep));
        assert!(Wavelengths::try_from(&[] as &[f64]).is_err());
    }

    #[test]
    fn test_wavelengths_from_scalar() {
        let wavelengths = Wavelengths::from(2.0);
        assert_eq!(wavelengths.as_slice(), [2.0]);
        assert_eq!(wavelengths.len(), 1);
    }

    #[rstest]
    #[case(vec![2.0], true)]
    #[case(vec![1.0, 2.0, 3.0], true)]
    #[case(vec![3.0, 1.0], true)]
    #[case(vec![1.0, 0.0], false)]
    #[case(vec![-2.0], false)]
    #[case(vec![f64::NAN], false)]
    #[case(vec![f64::INFINITY], false)]
    fn test_wavelengths_validate(#[case] values: Vec<f64>, #[case] expected_valid: bool) {
        let wavelengths = Wavelengths::new(values).unwrap();
        assert_eq!(wavelengths.validate().is_ok(), expected_valid);
    }

    #[test]
    fn test_range_excludes_stop() {
        let range = WavelengthRange {
            start: 1.0,
            stop: 3.0,
            step: 0.02,
        };
        let wavelengths = range.to_wavelengths().unwrap();
        assert_eq!(wavelengths.len(), 100);
        assert_eq!(wavelengths.as_slice()[0], 1.0);
        assert_approx_eq!(f64, *wavelengths.as_slice().last().unwrap(), 2.98);
    }

    #[test]
    fn test_range_partial_step() {
        let range = WavelengthRange {
            start: 1.0,
            stop: 2.0,
            step: 0.3,
        };
        let wavelengths = range.to_wavelengths().unwrap();
        assert_eq!(wavelengths.len(), 4);
    }

    #[rstest]
    #[case(1.0, 3.0, 0.0)]
    #[case(1.0, 3.0, -0.1)]
    #[case(1.0, 3.0, f64::NAN)]
    #[case(3.0, 1.0, 0.1)]
    #[case(1.0, 1.0, 0.1)]
    #[case(1.0, f64::INFINITY, 0.1)]
    fn test_range_invalid(#[case] start: f64, #[case] stop: f64, #[case] step: f64) {
        let range = WavelengthRange { start, stop, step };
        assert!(range.to_wavelengths().is_err());
    }

    #[test]
    fn test_result_rows_aligned() {
        let mut result = OpticalResult::with_capacity(2);
        result.push(1.0, 3.2, 1e-3, 0.2);
        result.push(2.0, 3.1, 1e-5, 0.0);

        assert_eq!(result.len(), 2);
        assert_eq!(
            result.rows().collect_vec(),
            [(1.0, 3.2, 1e-3, 0.2), (2.0, 3.1, 1e-5, 0.0)]
        );
        assert_eq!(result.refractive_index_series(), [(1.0, 3.2), (2.0, 3.1)]);
        assert_eq!(
            result.extinction_series(),
            [(1.0, 1e-3, 0.2), (2.0, 1e-5, 0.0)]
        );
    }

    #[test]
    fn test_result_summary() {
        let mut result = OpticalResult::with_capacity(1);
        result.push(2.0, 3.5, 0.001, 0.0);
        assert_eq!(result.summary(), "n: [3.5e0]\nk1: [1e-3]\nk2: [0e0]");
    }
}
