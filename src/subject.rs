//! Immutable attendance snapshot for a single subject.
//!
//! The persisted subject entity lives in whatever storage the caller uses;
//! the calculator only ever sees an [`AttendanceSnapshot`] — a validated,
//! immutable copy of the counters taken at request time. Keeping the
//! arithmetic off the storage entity means every derived value is an
//! explicit function call over fixed inputs, not a lazy property of a
//! mutable record.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::Percentage;

/// A subject's attendance counters at a single point in time.
///
/// Invariants enforced at construction:
/// - `attended_lectures <= total_lectures`
/// - `minimum_attendance` in `[0, 100]`
///
/// Counters are unsigned, so negative counts are unrepresentable; callers
/// parsing signed external input must reject negatives before constructing
/// a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSnapshot {
    attended_lectures: u32,
    total_lectures: u32,
    minimum_attendance: f64,
}

impl AttendanceSnapshot {
    /// Create a validated snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when `attended > total`, when
    /// `minimum` is outside `[0, 100]`, or when `minimum` is not finite.
    pub fn new(attended: u32, total: u32, minimum: f64) -> Result<Self> {
        if attended > total {
            return Err(Error::invalid_input(format!(
                "attended lectures ({attended}) cannot exceed total lectures ({total})"
            )));
        }
        if !minimum.is_finite() || !(0.0..=100.0).contains(&minimum) {
            return Err(Error::invalid_input(format!(
                "minimum attendance must be between 0 and 100, got {minimum}"
            )));
        }
        Ok(Self {
            attended_lectures: attended,
            total_lectures: total,
            minimum_attendance: minimum,
        })
    }

    /// Lectures attended.
    #[must_use]
    pub const fn attended(self) -> u32 {
        self.attended_lectures
    }

    /// Lectures held.
    #[must_use]
    pub const fn total(self) -> u32 {
        self.total_lectures
    }

    /// Required attendance threshold in percent.
    #[must_use]
    pub const fn minimum(self) -> f64 {
        self.minimum_attendance
    }

    /// Lectures missed so far.
    #[must_use]
    pub const fn absent_lectures(self) -> u32 {
        self.total_lectures - self.attended_lectures
    }

    /// Current attendance percentage, rounded for display.
    ///
    /// Zero when no lectures have been held.
    #[must_use]
    pub fn percentage(self) -> Percentage {
        Percentage::from_ratio(self.attended_lectures, self.total_lectures)
    }

    /// Whether the current counters meet the minimum threshold.
    ///
    /// Uses the exact comparison `attended * 100 >= minimum * total` — no
    /// division and no rounding, so boundary cases are decided on the true
    /// ratio rather than a two-decimal approximation. With zero lectures
    /// held, only a zero threshold is met (consistent with the 0% policy
    /// of [`Self::percentage`]).
    #[must_use]
    pub fn meets_minimum(self) -> bool {
        if self.total_lectures == 0 {
            return self.minimum_attendance <= 0.0;
        }
        f64::from(self.attended_lectures) * 100.0
            >= self.minimum_attendance * f64::from(self.total_lectures)
    }

    /// The snapshot after `n` consecutive bunks: total grows, attended
    /// does not. Saturates at the counter range.
    #[must_use]
    pub const fn after_bunks(self, n: u32) -> Self {
        Self {
            attended_lectures: self.attended_lectures,
            total_lectures: self.total_lectures.saturating_add(n),
            minimum_attendance: self.minimum_attendance,
        }
    }

    /// The snapshot after attending `n` more lectures: both counters grow.
    /// Saturates at the counter range; `attended <= total` is preserved.
    #[must_use]
    pub const fn after_attending(self, n: u32) -> Self {
        Self {
            attended_lectures: self.attended_lectures.saturating_add(n),
            total_lectures: self.total_lectures.saturating_add(n),
            minimum_attendance: self.minimum_attendance,
        }
    }
}

impl fmt::Display for AttendanceSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} attended ({})",
            self.attended_lectures,
            self.total_lectures,
            self.percentage()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(attended: u32, total: u32, minimum: f64) -> AttendanceSnapshot {
        AttendanceSnapshot::new(attended, total, minimum).unwrap()
    }

    #[test]
    fn rejects_attended_above_total() {
        assert!(matches!(
            AttendanceSnapshot::new(5, 4, 75.0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_minimum() {
        assert!(AttendanceSnapshot::new(1, 2, -0.1).is_err());
        assert!(AttendanceSnapshot::new(1, 2, 100.1).is_err());
        assert!(AttendanceSnapshot::new(1, 2, f64::NAN).is_err());
        assert!(AttendanceSnapshot::new(1, 2, 0.0).is_ok());
        assert!(AttendanceSnapshot::new(1, 2, 100.0).is_ok());
    }

    #[test]
    fn derived_counters() {
        let s = snap(30, 40, 75.0);
        assert_eq!(s.absent_lectures(), 10);
        assert_eq!(s.percentage().get(), 75.0);
    }

    #[test]
    fn meets_minimum_is_exact_at_boundary() {
        // Exactly at the threshold counts as meeting it
        assert!(snap(30, 40, 75.0).meets_minimum());
        assert!(!snap(29, 40, 75.0).meets_minimum());
        // 2/3 = 66.66..% rounds up to 66.67 but is genuinely below 66.67
        assert!(!snap(2, 3, 66.67).meets_minimum());
        assert!(snap(2, 3, 66.66).meets_minimum());
    }

    #[test]
    fn zero_lectures_meets_only_zero_threshold() {
        assert!(snap(0, 0, 0.0).meets_minimum());
        assert!(!snap(0, 0, 75.0).meets_minimum());
    }

    #[test]
    fn hypothetical_worlds() {
        let s = snap(30, 40, 75.0);
        let bunked = s.after_bunks(2);
        assert_eq!((bunked.attended(), bunked.total()), (30, 42));
        let attended = s.after_attending(3);
        assert_eq!((attended.attended(), attended.total()), (33, 43));
        // original is untouched
        assert_eq!((s.attended(), s.total()), (30, 40));
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", snap(30, 40, 75.0)), "30/40 attended (75.00%)");
    }
}
