//! # Attendance Analytics
//!
//! Student attendance analytics for lecture-based courses.
//!
//! This crate provides:
//! - An immutable snapshot type for a subject's attendance counters
//! - Pure attendance arithmetic: current percentage, safe-bunk count,
//!   classes needed to recover, and multi-step bunk simulation
//! - A single-bunk forecast with a plain-language recommendation
//! - A small CLI for querying projections from the terminal
//!
//! The calculator is a read-only projection layer: it never stores or
//! mutates counters, and every operation is deterministic and bounded.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod display;
pub mod error;
pub mod predictor;
pub mod subject;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use predictor::{BunkForecast, ClassesNeeded, SafeBunks, Simulation, SimulationStep};
pub use subject::AttendanceSnapshot;
pub use types::Percentage;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "attendance-analytics";
