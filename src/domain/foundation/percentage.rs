//! Reduction percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stock reduction between 0 and 100 percent inclusive.
///
/// Out-of-range input is clamped through [`new`](Self::new), including
/// when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct ReductionPercentage(f64);

impl ReductionPercentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0.0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100.0);

    /// Creates a new percentage, clamping to the valid range. NaN becomes zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 100.0))
    }

    /// Returns the value on the 0-100 scale.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the value as a fraction (0.0 to 1.0).
    pub fn as_fraction(&self) -> f64 {
        self.0 / 100.0
    }
}

impl Default for ReductionPercentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<f64> for ReductionPercentage {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<ReductionPercentage> for f64 {
    fn from(value: ReductionPercentage) -> Self {
        value.0
    }
}

impl fmt::Display for ReductionPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
