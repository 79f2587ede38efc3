//! Domain-specific newtypes for type safety.
//!
//! This module provides a strongly-typed wrapper for attendance percentages
//! so that raw ratios and display-ready values cannot be mixed up at call
//! sites. Uses `derive_more` to eliminate conversion boilerplate.

use std::fmt;

use derive_more::Into;
use serde::Serialize;

/// An attendance percentage, rounded to two decimal places.
///
/// Values are rounded half-away-from-zero at construction time (the
/// `f64::round` contract), so every `Percentage` in the system is already
/// display-ready. Threshold comparisons should be made on the exact counters
/// via [`crate::subject::AttendanceSnapshot::meets_minimum`], not on rounded
/// percentages; this type exists for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Into, Serialize)]
#[serde(transparent)]
pub struct Percentage(f64);

impl Percentage {
    /// Create a percentage from a raw value, rounding to two decimal places.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self((value * 100.0).round() / 100.0)
    }

    /// Create a percentage from an attended/total lecture ratio.
    ///
    /// Returns zero when `total` is zero. This is a policy choice (a subject
    /// with no lectures held has "0%" attendance), not a mathematical value.
    #[must_use]
    pub fn from_ratio(attended: u32, total: u32) -> Self {
        if total == 0 {
            Self(0.0)
        } else {
            Self::new(f64::from(attended) / f64::from(total) * 100.0)
        }
    }

    /// Get the inner value.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}
