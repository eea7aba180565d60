//! `slots` CLI — compute bookable appointment slots from JSON files.
//!
//! ## Usage
//!
//! ```sh
//! # Slots for a 30-minute service on a date
//! slots slots --schedule barber.json --date 2026-03-16 --duration 30
//!
//! # Same, subtracting existing reservations, as plain text
//! slots slots -s barber.json -d 2026-03-16 -m 30 -r reservations.json --format text
//!
//! # Does the barber work that day?
//! slots working-day -s barber.json -d 2026-03-17
//!
//! # Date strip for the next 15 days
//! slots days -s barber.json --from 2026-03-16
//!
//! # Slots grouped into morning and afternoon tabs
//! slots slots -s barber.json -d 2026-03-16 -m 30 --format periods
//!
//! # Which reservations collide with a proposed appointment?
//! slots check -r reservations.json --start 2026-03-16T09:00:00 --end 2026-03-16T09:30:00
//! ```
//!
//! Diagnostics go to stderr; set `RUST_LOG=slot_engine=debug` for engine traces.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use slot_engine::slots::DEFAULT_UPCOMING_DAYS;
use slot_engine::{DayPeriod, PeriodSlots, Reservation, ReservationRecord, TimeSlot, WeeklySchedule};
use std::io;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Barbershop appointment availability calculator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List bookable time slots for a service on a date
    Slots {
        /// Weekly schedule JSON file
        #[arg(short, long)]
        schedule: String,
        /// Target date (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,
        /// Service duration in minutes
        #[arg(short = 'm', long)]
        duration: u32,
        /// Existing reservations JSON file (none if omitted)
        #[arg(short, long)]
        reservations: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Print whether the barber works on a date
    WorkingDay {
        /// Weekly schedule JSON file
        #[arg(short, long)]
        schedule: String,
        /// Date to check (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,
    },
    /// Print upcoming dates with their working-day flag
    Days {
        /// Weekly schedule JSON file
        #[arg(short, long)]
        schedule: String,
        /// First date of the strip (defaults to today)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Number of days to list
        #[arg(long, default_value_t = DEFAULT_UPCOMING_DAYS)]
        count: usize,
    },
    /// Report reservations that overlap a proposed appointment
    Check {
        /// Existing reservations JSON file
        #[arg(short, long)]
        reservations: String,
        /// Proposed start (YYYY-MM-DDTHH:MM:SS)
        #[arg(long)]
        start: NaiveDateTime,
        /// Proposed end (YYYY-MM-DDTHH:MM:SS)
        #[arg(long)]
        end: NaiveDateTime,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON array of {start, end, label}
    Json,
    /// One `HH:mm-HH:mm` line per slot
    Text,
    /// JSON object with `morning`/`afternoon` arrays and the `defaultPeriod` tab
    Periods,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PeriodsOutput<'a> {
    default_period: DayPeriod,
    #[serde(flatten)]
    slots: &'a PeriodSlots,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Slots {
            schedule,
            date,
            duration,
            reservations,
            output,
            format,
        } => {
            if duration == 0 {
                anyhow::bail!("--duration must be a positive number of minutes");
            }

            let schedule = load_schedule(&schedule)?;
            let reservations = match reservations {
                Some(path) => load_reservations(&path)?,
                None => Vec::new(),
            };

            let slots = slot_engine::compute_time_slots(&schedule, date, duration, &reservations);
            info!(%date, duration, count = slots.len(), "computed slots");

            let rendered = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&slots)?,
                OutputFormat::Text => render_text(&slots),
                OutputFormat::Periods => {
                    let periods = slot_engine::partition_by_period(&slots);
                    serde_json::to_string_pretty(&PeriodsOutput {
                        default_period: periods.default_period(),
                        slots: &periods,
                    })?
                }
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::WorkingDay { schedule, date } => {
            let schedule = load_schedule(&schedule)?;
            println!("{}", slot_engine::is_working_day(&schedule, date));
        }
        Commands::Days {
            schedule,
            from,
            count,
        } => {
            let schedule = load_schedule(&schedule)?;
            let from = from.unwrap_or_else(|| Local::now().date_naive());
            let days = slot_engine::upcoming_days(&schedule, from, count);
            println!("{}", serde_json::to_string_pretty(&days)?);
        }
        Commands::Check {
            reservations,
            start,
            end,
        } => {
            if start >= end {
                anyhow::bail!("--start ({}) must be before --end ({})", start, end);
            }

            let reservations = load_reservations(&reservations)?;
            let conflicts = slot_engine::find_conflicts(start, end, &reservations);
            println!("{}", serde_json::to_string_pretty(&conflicts)?);
        }
    }

    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read and validate a weekly schedule file.
fn load_schedule(path: &str) -> Result<WeeklySchedule> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schedule file: {}", path))?;
    let schedule: WeeklySchedule = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse schedule JSON: {}", path))?;
    schedule
        .validate()
        .with_context(|| format!("Invalid schedule: {}", path))?;
    debug!(path, days = schedule.days().len(), "loaded schedule");
    Ok(schedule)
}

/// Read a reservations file, dropping records that do not block time.
fn load_reservations(path: &str) -> Result<Vec<Reservation>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read reservations file: {}", path))?;
    let records: Vec<ReservationRecord> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse reservations JSON: {}", path))?;
    let blocking = slot_engine::blocking_reservations(&records);
    debug!(
        path,
        total = records.len(),
        blocking = blocking.len(),
        "loaded reservations"
    );
    Ok(blocking)
}

fn render_text(slots: &[TimeSlot]) -> String {
    slots
        .iter()
        .map(|s| format!("{}-{}", s.label, s.end.format("%H:%M")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
