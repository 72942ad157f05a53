//! This module defines the physical quantities used in the optical models.

macro_rules! unit_struct {
    ($name:ident, $symbol:literal) => {
        #[doc = concat!("A quantity measured in ", $symbol, ".")]
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            PartialOrd,
            derive_more::Add,
            derive_more::Sub,
            derive_more::Display,
        )]
        #[display("{} {}", _0, $symbol)]
        pub struct $name(pub f64);

        impl $name {
            /// Creates a new instance of the unit type from a f64 value.
            pub fn new(val: f64) -> Self {
                Self(val)
            }

            /// Returns the value of the unit type as a f64.
            pub fn value(self) -> f64 {
                self.0
            }

            /// Whether the underlying value is finite
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }
        }

        impl std::ops::Mul<f64> for $name {
            type Output = $name;
            fn mul(self, rhs: f64) -> $name {
                $name(self.0 * rhs)
            }
        }

        impl std::ops::Div<f64> for $name {
            type Output = $name;
            fn div(self, rhs: f64) -> $name {
                $name(self.0 / rhs)
            }
        }

        impl From<f64> for $name {
            fn from(val: f64) -> Self {
                Self(val)
            }
        }
    };
}

unit_struct!(Kelvin, "K");
unit_struct!(ElectronVolts, "eV");
unit_struct!(Micrometres, "um");
unit_struct!(PerCentimetre, "cm^-1");

impl ElectronVolts {
    /// Convert to millielectronvolts
    pub fn to_millielectronvolts(self) -> f64 {
        self.0 * 1000.0
    }
}

impl Micrometres {
    /// Convert to centimetres
    pub fn to_centimetres(self) -> f64 {
        self.0 / 1e4
    }
}
