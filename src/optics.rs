//! Closed-form optical models evaluated at a single wavelength.
//!
//! All functions here are pure: they depend only on the [`DerivedCoefficients`] of a sample and
//! the wavelength.
use crate::coefficients::{AbsorptionCoefficients, DerivedCoefficients, DispersionCoefficients};
use crate::material::Material;
use crate::units::{ElectronVolts, Micrometres, PerCentimetre};
use std::f64::consts::PI;

/// Photon energy of light with a wavelength of 1 um, in eV.
///
/// Derived from Planck's constant (4.13566743e-15 eV s) and c = 3e8 m/s.
pub const PHOTON_ENERGY_CONSTANT: f64 = 4.13566743 * 3.0 / 10.0;

/// The extinction coefficient split into its Urbach tail and intrinsic contributions.
///
/// Both parts are always reported; which one dominates depends on the photon energy relative to
/// the band gap.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extinction {
    /// Contribution from the Urbach tail
    pub k1: f64,
    /// Contribution from intrinsic band-to-band absorption
    pub k2: f64,
}

/// The energy of a photon with the given wavelength
pub fn photon_energy(wavelength: Micrometres) -> ElectronVolts {
    ElectronVolts(PHOTON_ENERGY_CONSTANT / wavelength.value())
}

/// The real part of the refractive index at the given wavelength.
///
/// When `c1 / wavelength` is ±1 the dispersion relation has a pole and the result is infinite or
/// NaN.
pub fn refractive_index(coeffs: &DispersionCoefficients, wavelength: Micrometres) -> f64 {
    let lambda = wavelength.value();
    let ratio = coeffs.c1 / lambda;

    (coeffs.a1 + coeffs.b1 / (1.0 - ratio * ratio) + coeffs.d1 * lambda * lambda).sqrt()
}

/// Absorption coefficient of the Urbach tail
pub fn urbach_absorption(coeffs: &AbsorptionCoefficients, energy: ElectronVolts) -> PerCentimetre {
    coeffs.alpha0 * (coeffs.sigma * (energy - coeffs.e0).value() / coeffs.w.value()).exp()
}

/// Absorption coefficient for band-to-band transitions.
///
/// Zero for photon energies below the band gap.
pub fn intrinsic_absorption(
    coeffs: &AbsorptionCoefficients,
    energy: ElectronVolts,
) -> PerCentimetre {
    if energy >= coeffs.eg {
        PerCentimetre(coeffs.beta * (energy - coeffs.eg).value().sqrt())
    } else {
        PerCentimetre(0.0)
    }
}

/// Convert an absorption coefficient to the corresponding extinction coefficient
pub fn absorption_to_extinction(absorption: PerCentimetre, wavelength: Micrometres) -> f64 {
    absorption.value() / (4.0 * PI) * wavelength.to_centimetres()
}

/// The extinction coefficient of a material at the given wavelength.
///
/// CdTe is treated as transparent, so both parts are zero.
pub fn extinction(
    material: Material,
    coeffs: &AbsorptionCoefficients,
    wavelength: Micrometres,
) -> Extinction {
    if !material.is_absorbing() {
        return Extinction::default();
    }

    let energy = photon_energy(wavelength);
    Extinction {
        k1: absorption_to_extinction(urbach_absorption(coeffs, energy), wavelength),
        k2: absorption_to_extinction(intrinsic_absorption(coeffs, energy), wavelength),
    }
}

/// The refractive index and extinction coefficient at a single wavelength
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpticalConstants {
    /// Real part of the refractive index
    pub n: f64,
    /// Imaginary part of the refractive index
    pub k: Extinction,
}

/// Evaluate all optical constants for a material at the given wavelength
pub fn optical_constants(
    material: Material,
    coeffs: &DerivedCoefficients,
    wavelength: Micrometres,
) -> OpticalConstants {
    OpticalConstants {
        n: refractive_index(&coeffs.dispersion, wavelength),
        k: extinction(material, &coeffs.absorption, wavelength),
    }
}
