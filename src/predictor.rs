//! Bunk prediction and attendance projections.
//!
//! Pure functions over an [`AttendanceSnapshot`]: how many lectures can
//! still be skipped, how many are needed to recover, and what a run of
//! hypothetical absences does to the percentage step by step.
//!
//! All decisions use the snapshot's exact threshold comparison; the
//! closed-form searches below are corrected against that same predicate,
//! so results always match the step-by-step definition while staying
//! bounded for large lecture counts.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::subject::AttendanceSnapshot;
use crate::types::Percentage;

/// Upper bound on simulation length, guarding response size.
pub const MAX_SIMULATION_STEPS: u32 = 50;

/// How many consecutive future lectures can be skipped while staying at or
/// above the minimum threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SafeBunks {
    /// At most this many bunks keep the percentage at or above the minimum.
    Bounded(u32),
    /// A zero threshold can never be violated.
    Unlimited,
}

impl SafeBunks {
    /// The bunk count, or `None` when unlimited.
    #[must_use]
    pub const fn count(self) -> Option<u32> {
        match self {
            Self::Bounded(n) => Some(n),
            Self::Unlimited => None,
        }
    }
}

impl fmt::Display for SafeBunks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounded(n) => write!(f, "{n}"),
            Self::Unlimited => write!(f, "unlimited"),
        }
    }
}

/// Additional attended lectures required to reach the minimum threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ClassesNeeded {
    /// Already at or above the threshold; nothing to recover.
    AlreadyMet,
    /// Attending this many more lectures (with no further absences) reaches
    /// the threshold.
    Required(u32),
    /// A 100% requirement cannot be reached once a lecture has been missed.
    Unreachable,
}

impl ClassesNeeded {
    /// The class count, or `None` when the target is unreachable.
    #[must_use]
    pub const fn count(self) -> Option<u32> {
        match self {
            Self::AlreadyMet => Some(0),
            Self::Required(n) => Some(n),
            Self::Unreachable => None,
        }
    }
}

impl fmt::Display for ClassesNeeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyMet => write!(f, "0"),
            Self::Required(n) => write!(f, "{n}"),
            Self::Unreachable => write!(f, "unreachable"),
        }
    }
}

/// One step of a bunk simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationStep {
    /// 1-based step index.
    pub step: u32,
    /// Total lectures after this many bunks.
    pub total_lectures: u32,
    /// Attended lectures (unchanged by bunking).
    pub attended_lectures: u32,
    /// Projected attendance at this step.
    pub attendance: Percentage,
    /// Whether the projection still meets the minimum threshold.
    pub is_safe: bool,
}

/// A finite, ordered bunk simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Simulation {
    /// Per-step projections, one per simulated bunk.
    pub steps: Vec<SimulationStep>,
    /// First step index where the projection falls below the minimum, if any.
    pub turning_point: Option<u32>,
}

impl Simulation {
    /// Whether every simulated step stays at or above the minimum.
    #[must_use]
    pub const fn all_safe(&self) -> bool {
        self.turning_point.is_none()
    }
}

/// Projection for a single hypothetical bunk.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BunkForecast {
    /// Whether the bunk keeps attendance at or above the minimum.
    pub can_bunk: bool,
    /// Attendance before the bunk.
    pub current_attendance: Percentage,
    /// Attendance after the bunk.
    pub after_bunk_attendance: Percentage,
    /// Percentage points lost to the bunk.
    pub attendance_drop: Percentage,
    /// Classes needed to climb back to the minimum, counting the bunked
    /// lecture itself. [`ClassesNeeded::AlreadyMet`] when the bunk is safe.
    pub classes_to_recover: ClassesNeeded,
    /// Plain-language summary of the projection.
    pub recommendation: String,
}

/// Maximum bunks that keep attendance at or above the subject's minimum.
///
/// Returns [`SafeBunks::Unlimited`] for a zero threshold, and
/// `Bounded(0)` when no lectures have been held yet or the subject is
/// already below the minimum.
#[must_use]
pub fn safe_bunks(subject: AttendanceSnapshot) -> SafeBunks {
    if subject.minimum() <= 0.0 {
        return SafeBunks::Unlimited;
    }
    if subject.total() == 0 || !subject.meets_minimum() {
        return SafeBunks::Bounded(0);
    }

    // Largest b with attended * 100 >= minimum * (total + b), solved in
    // closed form. The percentage is strictly decreasing in b, so a local
    // fix-up against the exact predicate absorbs any float error in the
    // floor without changing the answer.
    let headroom = u32::MAX - subject.total();
    let estimate =
        f64::from(subject.attended()) * 100.0 / subject.minimum() - f64::from(subject.total());
    if estimate >= f64::from(headroom) {
        // Counter range exhausted before the threshold is; saturate.
        return SafeBunks::Bounded(headroom);
    }

    let mut bunks = if estimate > 0.0 { estimate.floor() as u32 } else { 0 };
    while bunks > 0 && !subject.after_bunks(bunks).meets_minimum() {
        bunks -= 1;
    }
    while subject.after_bunks(bunks + 1).meets_minimum() {
        bunks += 1;
    }
    SafeBunks::Bounded(bunks)
}

/// Minimum additional attended lectures needed to reach the subject's
/// threshold, with no further absences.
///
/// A 100% requirement is [`ClassesNeeded::Unreachable`] once any lecture
/// has been missed; before any lecture has been held, a single attended
/// lecture reaches it.
#[must_use]
pub fn classes_needed(subject: AttendanceSnapshot) -> ClassesNeeded {
    if subject.meets_minimum() {
        return ClassesNeeded::AlreadyMet;
    }
    if subject.minimum() >= 100.0 {
        // Below a 100% threshold here, so at least one lecture was missed
        // unless none have been held at all.
        return if subject.total() == 0 {
            ClassesNeeded::Required(1)
        } else {
            ClassesNeeded::Unreachable
        };
    }

    // Smallest n >= 1 with (attended + n) * 100 >= minimum * (total + n),
    // i.e. n >= (minimum * total - 100 * attended) / (100 - minimum).
    let headroom = u32::MAX - subject.total();
    let estimate = (subject.minimum() * f64::from(subject.total())
        - 100.0 * f64::from(subject.attended()))
        / (100.0 - subject.minimum());
    if estimate >= f64::from(headroom) {
        return ClassesNeeded::Required(headroom);
    }

    let mut needed = if estimate > 1.0 { estimate.ceil() as u32 } else { 1 };
    while needed > 1 && subject.after_attending(needed - 1).meets_minimum() {
        needed -= 1;
    }
    while !subject.after_attending(needed).meets_minimum() {
        needed += 1;
    }
    ClassesNeeded::Required(needed)
}

/// Project `bunk_count` consecutive bunks, one step per bunk.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when `bunk_count` is outside
/// `1..=`[`MAX_SIMULATION_STEPS`].
pub fn simulate(subject: AttendanceSnapshot, bunk_count: u32) -> Result<Simulation> {
    if !(1..=MAX_SIMULATION_STEPS).contains(&bunk_count) {
        return Err(Error::invalid_input(format!(
            "bunk count must be between 1 and {MAX_SIMULATION_STEPS}, got {bunk_count}"
        )));
    }

    let mut steps = Vec::with_capacity(bunk_count as usize);
    let mut turning_point = None;
    for step in 1..=bunk_count {
        let world = subject.after_bunks(step);
        let is_safe = world.meets_minimum();
        if !is_safe && turning_point.is_none() {
            turning_point = Some(step);
        }
        steps.push(SimulationStep {
            step,
            total_lectures: world.total(),
            attended_lectures: world.attended(),
            attendance: world.percentage(),
            is_safe,
        });
    }

    Ok(Simulation {
        steps,
        turning_point,
    })
}

/// Forecast a single bunk: the post-bunk percentage, the drop, and the
/// recovery cost when the bunk is unsafe.
///
/// The recovery count is searched in the post-bunk world and then
/// incremented by one, because the bunked lecture itself must be made up
/// for on top of whatever the search finds. Skipping that increment is
/// the classic off-by-one here.
#[must_use]
pub fn predict_single_bunk(subject: AttendanceSnapshot) -> BunkForecast {
    let current = subject.percentage();
    let after = subject.after_bunks(1);
    let after_attendance = after.percentage();
    let can_bunk = after.meets_minimum();

    let classes_to_recover = if can_bunk {
        ClassesNeeded::AlreadyMet
    } else {
        match classes_needed(after) {
            ClassesNeeded::Required(n) => ClassesNeeded::Required(n.saturating_add(1)),
            other => other,
        }
    };

    let threshold = Percentage::new(subject.minimum());
    let recommendation = if can_bunk {
        format!(
            "Safe to bunk: attendance would drop to {after_attendance}, still at or above the {threshold} requirement."
        )
    } else {
        match classes_to_recover {
            ClassesNeeded::Required(n) => format!(
                "Not safe to bunk: attendance would fall to {after_attendance}, below the {threshold} requirement. Attending the next {n} classes would recover it."
            ),
            _ => format!(
                "Not safe to bunk: attendance would fall to {after_attendance}, and a {threshold} requirement cannot be recovered once missed."
            ),
        }
    };

    BunkForecast {
        can_bunk,
        current_attendance: current,
        after_bunk_attendance: after_attendance,
        attendance_drop: Percentage::new(current.get() - after_attendance.get()),
        classes_to_recover,
        recommendation,
    }
}
