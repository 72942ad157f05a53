//! Empirical model coefficients derived from a material sample.
//!
//! The refractive index follows a Cauchy-like dispersion relation whose coefficients depend on
//! composition and temperature. Absorption combines an Urbach tail with intrinsic band-to-band
//! absorption above the band gap.
use crate::material::MaterialSample;
use crate::units::{ElectronVolts, Kelvin, Micrometres, PerCentimetre};

/// Reference temperature for the dispersion model
const DISPERSION_REFERENCE_TEMPERATURE: Kelvin = Kelvin(300.0);

/// Urbach tail temperature offset. Adjusted from the published value of 81.9 K.
pub const URBACH_T0: Kelvin = Kelvin(61.9);

/// Intrinsic absorption prefactor. Adjusted from the published value of 2.109e5.
const INTRINSIC_BETA_PREFACTOR: f64 = 3.109e5;

/// Conversion between band gap in eV and cutoff wavelength in um
pub const CUTOFF_WAVELENGTH_CONSTANT: f64 = 1.23984;

/// Coefficients of the refractive index dispersion model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispersionCoefficients {
    /// Constant term
    pub a1: f64,
    /// Oscillator strength
    pub b1: f64,
    /// Oscillator wavelength (um)
    pub c1: f64,
    /// Lattice absorption term (um^-2)
    pub d1: f64,
}

impl DispersionCoefficients {
    /// Derive dispersion coefficients for the given composition and temperature
    pub fn new(x: f64, temperature: Kelvin) -> Self {
        let dt = (DISPERSION_REFERENCE_TEMPERATURE - temperature).value();
        let x2 = x * x;

        Self {
            a1: 13.173 - 9.852 * x + 2.909 * x2 + 1e-4 * dt,
            b1: 0.83 - 0.246 * x - 0.0961 * x2 + 8e-5 * dt,
            c1: 6.706 - 14.437 * x + 8.531 * x2 + 7e-5 * dt,
            d1: 1.953e-5 - 0.00128 * x + 1.853e-5 * x2,
        }
    }
}

/// Coefficients of the Urbach tail and intrinsic absorption models
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbsorptionCoefficients {
    /// Urbach temperature offset
    pub t0: Kelvin,
    /// Effective Urbach temperature, T0 + T
    pub w: Kelvin,
    /// Urbach focus energy
    pub e0: ElectronVolts,
    /// Urbach steepness (K/eV)
    pub sigma: f64,
    /// Urbach absorption at the focus energy
    pub alpha0: PerCentimetre,
    /// Intrinsic absorption prefactor (cm^-1 eV^-1/2)
    pub beta: f64,
    /// Band gap energy
    pub eg: ElectronVolts,
}

impl AbsorptionCoefficients {
    /// Derive absorption coefficients for the given composition and temperature
    pub fn new(x: f64, temperature: Kelvin) -> Self {
        let t0 = URBACH_T0;
        let w = t0 + temperature;
        let e0 = -0.3424 + 1.838 * x + 0.148 * x.powi(4);
        let eg = e0 + (0.0629 + 7.68e-4 * temperature.value()) * ((1.0 - 2.14 * x) / (1.0 + x));

        Self {
            t0,
            w,
            e0: ElectronVolts(e0),
            sigma: 3.267e4 * (1.0 + x),
            alpha0: PerCentimetre((53.61 * x - 18.88).exp()),
            beta: INTRINSIC_BETA_PREFACTOR * ((1.0 + x) / w.value()).sqrt(),
            eg: ElectronVolts(eg),
        }
    }
}

/// All coefficients derived from a [`MaterialSample`].
///
/// These are computed once when the sample is fixed and depend only on the composition and
/// temperature, never on wavelength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedCoefficients {
    /// Refractive index coefficients
    pub dispersion: DispersionCoefficients,
    /// Absorption coefficients
    pub absorption: AbsorptionCoefficients,
}

impl DerivedCoefficients {
    /// Derive the coefficients for a sample
    pub fn new(sample: &MaterialSample) -> Self {
        Self {
            dispersion: DispersionCoefficients::new(sample.x, sample.temperature),
            absorption: AbsorptionCoefficients::new(sample.x, sample.temperature),
        }
    }

    /// The band gap energy
    pub fn band_gap(&self) -> ElectronVolts {
        self.absorption.eg
    }

    /// The cutoff wavelength corresponding to the band gap
    pub fn cutoff_wavelength(&self) -> Micrometres {
        Micrometres(CUTOFF_WAVELENGTH_CONSTANT / self.band_gap().value())
    }
}
