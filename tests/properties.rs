//! Property-based tests for the attendance calculator.
//!
//! The closed-form searches in the predictor must agree exactly with the
//! step-by-step definitions for all valid inputs; these tests fuzz that
//! equivalence along with the arithmetic invariants of the calculator
//! (percentage bounds, monotonicity, simulation prefix consistency).
//!
//! All threshold checks here use the calculator's own exact predicate
//! (`AttendanceSnapshot::meets_minimum`), which is the documented contract:
//! safe/unsafe decisions are made on exact counter ratios, rounding is
//! display-only.

use proptest::prelude::*;

use attendance_analytics::predictor::{
    classes_needed, safe_bunks, simulate, ClassesNeeded, SafeBunks,
};
use attendance_analytics::subject::AttendanceSnapshot;

/// Step-by-step reference for `safe_bunks`: count bunks one at a time until
/// the threshold check fails.
fn iterative_safe_bunks(subject: AttendanceSnapshot) -> SafeBunks {
    if subject.minimum() <= 0.0 {
        return SafeBunks::Unlimited;
    }
    if subject.total() == 0 || !subject.meets_minimum() {
        return SafeBunks::Bounded(0);
    }
    let mut bunks = 0;
    while subject.after_bunks(bunks + 1).meets_minimum() {
        bunks += 1;
    }
    SafeBunks::Bounded(bunks)
}

/// Step-by-step reference for `classes_needed`: attend lectures one at a
/// time until the threshold check passes.
fn iterative_classes_needed(subject: AttendanceSnapshot) -> ClassesNeeded {
    if subject.meets_minimum() {
        return ClassesNeeded::AlreadyMet;
    }
    if subject.minimum() >= 100.0 {
        return if subject.total() == 0 {
            ClassesNeeded::Required(1)
        } else {
            ClassesNeeded::Unreachable
        };
    }
    let mut needed = 1;
    while !subject.after_attending(needed).meets_minimum() {
        needed += 1;
    }
    ClassesNeeded::Required(needed)
}

/// Counter pairs with `attended <= total`, including the empty subject.
fn counters() -> impl Strategy<Value = (u32, u32)> {
    (0u32..=200).prop_flat_map(|total| (0..=total, Just(total)))
}

/// Thresholds covering both closed boundaries and the interior.
///
/// The interior stays away from 100 so the step-by-step references finish
/// quickly; the exact boundaries are always included.
fn minimums() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        Just(100.0),
        Just(75.0),
        5.0..=99.5f64,
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_percentage_stays_in_range((attended, total) in counters()) {
        let subject = AttendanceSnapshot::new(attended, total, 75.0).unwrap();
        let percentage = subject.percentage().get();
        prop_assert!((0.0..=100.0).contains(&percentage));
        if total == 0 {
            prop_assert_eq!(percentage, 0.0);
        }
    }

    #[test]
    fn prop_percentage_monotone_in_total(
        (attended, total) in counters(),
        extra in 1u32..=50,
    ) {
        let before = AttendanceSnapshot::new(attended, total, 75.0).unwrap();
        let after = before.after_bunks(extra);
        // Fixed numerator, growing denominator: percentage never increases
        prop_assert!(after.percentage() <= before.percentage());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_safe_bunks_matches_iterative(
        (attended, total) in counters(),
        minimum in minimums(),
    ) {
        let subject = AttendanceSnapshot::new(attended, total, minimum).unwrap();
        prop_assert_eq!(safe_bunks(subject), iterative_safe_bunks(subject));
    }

    #[test]
    fn prop_safe_bunks_is_the_exact_boundary(
        (attended, total) in counters(),
        minimum in minimums(),
    ) {
        let subject = AttendanceSnapshot::new(attended, total, minimum).unwrap();
        if let SafeBunks::Bounded(bunks) = safe_bunks(subject) {
            if bunks > 0 {
                // Every count up to the answer is safe, the next one is not
                prop_assert!(subject.after_bunks(bunks).meets_minimum());
            }
            if subject.meets_minimum() && subject.total() > 0 {
                prop_assert!(!subject.after_bunks(bunks + 1).meets_minimum());
            }
        }
    }

    #[test]
    fn prop_classes_needed_matches_iterative(
        (attended, total) in counters(),
        minimum in minimums(),
    ) {
        let subject = AttendanceSnapshot::new(attended, total, minimum).unwrap();
        prop_assert_eq!(classes_needed(subject), iterative_classes_needed(subject));
    }

    #[test]
    fn prop_classes_needed_monotone_in_minimum(
        (attended, total) in counters(),
        lower in 5.0..=99.5f64,
        raise in 0.0..=0.5f64,
    ) {
        let higher = lower + raise;
        let relaxed = AttendanceSnapshot::new(attended, total, lower).unwrap();
        let strict = AttendanceSnapshot::new(attended, total, higher).unwrap();

        // Unreachable sorts above every finite count
        let as_ord = |needed: ClassesNeeded| needed.count().map_or(u64::from(u32::MAX) + 1, u64::from);
        prop_assert!(as_ord(classes_needed(relaxed)) <= as_ord(classes_needed(strict)));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_simulation_prefix_consistent(
        (attended, total) in counters(),
        minimum in minimums(),
        longer in 2u32..=50,
        shorter in 1u32..=50,
    ) {
        prop_assume!(shorter < longer);
        let subject = AttendanceSnapshot::new(attended, total, minimum).unwrap();
        let long = simulate(subject, longer).unwrap();
        let short = simulate(subject, shorter).unwrap();
        prop_assert_eq!(&long.steps[..shorter as usize], &short.steps[..]);
    }

    #[test]
    fn prop_simulation_turning_point_is_first_unsafe(
        (attended, total) in counters(),
        minimum in minimums(),
        bunks in 1u32..=50,
    ) {
        let subject = AttendanceSnapshot::new(attended, total, minimum).unwrap();
        let sim = simulate(subject, bunks).unwrap();

        prop_assert_eq!(sim.steps.len(), bunks as usize);
        let first_unsafe = sim.steps.iter().find(|s| !s.is_safe).map(|s| s.step);
        prop_assert_eq!(sim.turning_point, first_unsafe);

        // Once unsafe, the percentage only shrinks further: no recovery
        if let Some(turn) = sim.turning_point {
            prop_assert!(sim.steps.iter().skip(turn as usize).all(|s| !s.is_safe));
        }
    }
}
