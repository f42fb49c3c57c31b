//! Conversion from input units (inches) to model units.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Unit system of the generated model.
///
/// Parameters are always given in inches; the model is emitted in either
/// inches (scale 1) or millimeters (scale 25.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Inch-native model.
    Inches,
    /// Millimeter model.
    #[default]
    Millimeters,
}

impl Units {
    /// Model units per inch.
    pub fn scale(self) -> f64 {
        match self {
            Units::Inches => 1.0,
            Units::Millimeters => MM_PER_INCH,
        }
    }

    /// Convert a length in inches to model units.
    pub fn to_model(self, inches: f64) -> f64 {
        inches * self.scale()
    }

    /// Convert a length in model units back to inches.
    pub fn from_model(self, value: f64) -> f64 {
        value / self.scale()
    }

    /// Short unit suffix.
    pub fn suffix(self) -> &'static str {
        match self {
            Units::Inches => "in",
            Units::Millimeters => "mm",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}
