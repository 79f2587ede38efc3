//! Attendance Analytics - Main entry point
//!
//! CLI front end for the attendance calculator: current standing,
//! single-bunk forecasts, and multi-step bunk simulations.

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use attendance_analytics::{
    config::Config,
    display,
    error::{Error, Result},
    predictor::{self, ClassesNeeded, SafeBunks},
    subject::AttendanceSnapshot,
    types::Percentage,
};

#[derive(Parser)]
#[command(name = "attendance")]
#[command(author, version, about = "Attendance percentages and bunk predictions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Emit machine-readable JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Subject counters shared by the projection subcommands.
#[derive(Args)]
struct SubjectArgs {
    /// Lectures attended
    #[arg(short, long)]
    attended: i64,

    /// Lectures held
    #[arg(short, long)]
    total: i64,

    /// Minimum attendance percentage (defaults to the configured threshold)
    #[arg(short, long)]
    minimum: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current attendance standing for a subject
    Status(SubjectArgs),

    /// Forecast a single bunk
    Predict(SubjectArgs),

    /// Simulate a run of consecutive bunks
    Simulate {
        #[command(flatten)]
        subject: SubjectArgs,

        /// Number of bunks to simulate (1-50)
        #[arg(short, long)]
        bunks: u32,
    },

    /// Show or edit configuration
    Config {
        /// Print current configuration
        #[arg(long)]
        show: bool,

        /// Create default configuration file
        #[arg(long)]
        init: bool,
    },
}

/// JSON report for the `status` subcommand.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport {
    attended_lectures: u32,
    total_lectures: u32,
    absent_lectures: u32,
    minimum_attendance: f64,
    attendance_percentage: Percentage,
    safe_bunks: SafeBunks,
    classes_needed: ClassesNeeded,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load and validate configuration
    let config = if let Some(ref path) = cli.config {
        Config::load_from(path)?
    } else {
        Config::load()?
    };
    config.validate()?;

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(config.general.log_level.clone())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Status(args) => {
            let subject = build_snapshot(&args, &config)?;
            run_status(subject, cli.json)
        }

        Commands::Predict(args) => {
            let subject = build_snapshot(&args, &config)?;
            run_predict(subject, cli.json)
        }

        Commands::Simulate { subject, bunks } => {
            let subject = build_snapshot(&subject, &config)?;
            run_simulate(subject, bunks, cli.json)
        }

        Commands::Config { show, init } => {
            if init {
                let default_config = Config::default();
                default_config.save()?;
                println!(
                    "Created default configuration at {}",
                    Config::config_path()?.display()
                );
            } else if show {
                let contents = toml::to_string_pretty(&config)?;
                println!("{contents}");
            } else {
                println!("Configuration path: {}", Config::config_path()?.display());
            }
            Ok(())
        }
    }
}

/// Build a validated snapshot from CLI counters.
///
/// The counters arrive signed so that negative input maps to the calculator's
/// own invalid-input error rather than an argument-parsing failure.
fn build_snapshot(args: &SubjectArgs, config: &Config) -> Result<AttendanceSnapshot> {
    let attended = u32::try_from(args.attended)
        .map_err(|_| Error::invalid_input(format!("attended lectures must be a non-negative count, got {}", args.attended)))?;
    let total = u32::try_from(args.total)
        .map_err(|_| Error::invalid_input(format!("total lectures must be a non-negative count, got {}", args.total)))?;
    let minimum = args.minimum.unwrap_or(config.thresholds.default_minimum);

    let subject = AttendanceSnapshot::new(attended, total, minimum)?;
    tracing::debug!(%subject, minimum, "loaded subject snapshot");
    Ok(subject)
}

fn run_status(subject: AttendanceSnapshot, json: bool) -> Result<()> {
    let safe = predictor::safe_bunks(subject);
    let needed = predictor::classes_needed(subject);

    if json {
        let report = StatusReport {
            attended_lectures: subject.attended(),
            total_lectures: subject.total(),
            absent_lectures: subject.absent_lectures(),
            minimum_attendance: subject.minimum(),
            attendance_percentage: subject.percentage(),
            safe_bunks: safe,
            classes_needed: needed,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    display::print_section_simple("ATTENDANCE STATUS");
    display::display_status(subject, safe, needed);
    Ok(())
}

fn run_predict(subject: AttendanceSnapshot, json: bool) -> Result<()> {
    let forecast = predictor::predict_single_bunk(subject);

    if json {
        println!("{}", serde_json::to_string_pretty(&forecast)?);
        return Ok(());
    }

    display::print_section_simple("BUNK FORECAST");
    display::display_forecast(&forecast);
    Ok(())
}

fn run_simulate(subject: AttendanceSnapshot, bunks: u32, json: bool) -> Result<()> {
    let simulation = predictor::simulate(subject, bunks)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&simulation)?);
        return Ok(());
    }

    display::print_section_simple(&format!("SIMULATING {bunks} BUNKS"));
    display::display_simulation(&simulation);
    Ok(())
}
