//! Display utilities for formatting projection output.
//!
//! This module provides shared formatting functions used by the CLI for
//! displaying attendance status and bunk projections in the terminal.
//!
//! # Functions
//!
//! - [`make_bar`] - Create a visual bar for a percentage value
//! - [`print_section_simple`] - Print a section header
//! - [`display_status`] / [`display_forecast`] / [`display_simulation`] -
//!   Display formatted projections

use crate::predictor::{BunkForecast, ClassesNeeded, SafeBunks, Simulation};
use crate::subject::AttendanceSnapshot;
use crate::types::Percentage;

/// Create a visual bar for a percentage in `[0, 100]`.
///
/// Uses Unicode block characters to create a proportional bar chart.
/// Out-of-range values are clamped.
///
/// # Examples
///
/// ```
/// use attendance_analytics::display::make_bar;
///
/// assert_eq!(make_bar(50.0, 10), "█████░░░░░");
/// assert_eq!(make_bar(0.0, 4), "░░░░");
/// ```
#[must_use]
pub fn make_bar(percentage: f64, width: usize) -> String {
    let ratio = (percentage / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Print a simple section header with dashes.
pub fn print_section_simple(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(30));
}

/// Display the current standing of a subject.
pub fn display_status(
    subject: AttendanceSnapshot,
    safe: SafeBunks,
    needed: ClassesNeeded,
) {
    let percentage = subject.percentage();
    println!(
        "  Attendance:     {} {}",
        make_bar(percentage.get(), 20),
        percentage
    );
    println!(
        "  Lectures:       {} attended, {} missed, {} held",
        subject.attended(),
        subject.absent_lectures(),
        subject.total()
    );
    println!("  Required:       {}", Percentage::new(subject.minimum()));
    println!("  Safe bunks:     {safe}");
    match needed {
        ClassesNeeded::AlreadyMet => {
            println!("  Status:         above the requirement");
        }
        ClassesNeeded::Required(n) => {
            println!("  Status:         below the requirement, {n} classes to recover");
        }
        ClassesNeeded::Unreachable => {
            println!("  Status:         below the requirement, unrecoverable");
        }
    }
}

/// Display a single-bunk forecast.
pub fn display_forecast(forecast: &BunkForecast) {
    let verdict = if forecast.can_bunk { "YES" } else { "NO" };
    println!("  Can bunk:       {verdict}");
    println!(
        "  Attendance:     {} -> {} (drop {})",
        forecast.current_attendance, forecast.after_bunk_attendance, forecast.attendance_drop
    );
    if let ClassesNeeded::Required(n) = forecast.classes_to_recover {
        println!("  To recover:     {n} classes");
    }
    println!("  {}", forecast.recommendation);
}

/// Display a bunk simulation as a step table.
pub fn display_simulation(simulation: &Simulation) {
    println!("  {:>4}  {:>9}  {:>10}  {}", "Step", "Lectures", "Projected", "Safe");
    for step in &simulation.steps {
        println!(
            "  {:>4}  {:>4}/{:<4}  {:>10}  {}",
            step.step,
            step.attended_lectures,
            step.total_lectures,
            step.attendance.to_string(),
            if step.is_safe { "yes" } else { "NO" }
        );
    }
    match simulation.turning_point {
        Some(step) => println!("\n  Falls below the requirement at step {step}."),
        None => println!("\n  All simulated bunks stay above the requirement."),
    }
}
