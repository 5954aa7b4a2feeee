//! `pawslots` CLI — generate bookable slots and convert provider-local times.
//!
//! ## Usage
//!
//! ```sh
//! # Slots for one date, business hours from a file
//! pawslots slots --hours hours.json --date 2026-03-16
//!
//! # Hourly slots for a week, marking existing bookings, as JSON
//! pawslots slots --hours hours.json --date 2026-03-16 --to 2026-03-22 \
//!   --interval 60 --bookings bookings.json --json
//!
//! # Business hours on stdin
//! cat hours.json | pawslots slots --date 2026-03-16
//!
//! # Local wall-clock time -> UTC
//! pawslots convert --date 2026-03-08 --time 02:30 --tz America/New_York --dst-policy shift-forward
//!
//! # UTC -> local wall-clock time
//! pawslots local --instant 2026-03-16T16:00:00Z --tz America/Los_Angeles
//!
//! # Check a proposed booking against existing ones
//! pawslots check --start 2026-03-16T17:30:00Z --end 2026-03-16T18:30:00Z --bookings bookings.json
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use slot_engine::{BusinessHours, DayAvailability, DstPolicy, ExistingBooking};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "pawslots",
    version,
    about = "Booking slot generation for PawSpace providers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate slots for a date (or an inclusive date range)
    Slots {
        /// Business-hours JSON file (reads from stdin if omitted)
        #[arg(long)]
        hours: Option<String>,
        /// Date to generate slots for (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Last date of an inclusive range (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Slot length in minutes
        #[arg(short, long, default_value_t = 30, allow_negative_numbers = true)]
        interval: i64,
        /// JSON array of existing bookings ({startUtc, endUtc})
        #[arg(short, long)]
        bookings: Option<String>,
        /// Only print slots that can still be booked
        #[arg(long)]
        available_only: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
        /// How to treat open/close times skipped by a DST transition
        #[arg(long, value_enum, default_value_t = DstArg::Reject)]
        dst_policy: DstArg,
    },
    /// Convert a local date and time in a timezone to a UTC instant
    Convert {
        /// Local date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Local time of day (HH:MM)
        #[arg(short, long)]
        time: String,
        /// IANA timezone (e.g., America/Los_Angeles)
        #[arg(long)]
        tz: String,
        /// How to treat times skipped by a DST transition
        #[arg(long, value_enum, default_value_t = DstArg::Reject)]
        dst_policy: DstArg,
    },
    /// Render a UTC instant as local wall-clock time in a timezone
    Local {
        /// RFC 3339 instant (e.g., 2026-03-16T16:00:00Z)
        #[arg(long)]
        instant: String,
        /// IANA timezone (e.g., America/Los_Angeles)
        #[arg(long)]
        tz: String,
    },
    /// Check a proposed booking against existing bookings
    Check {
        /// RFC 3339 start of the proposed booking
        #[arg(long)]
        start: String,
        /// RFC 3339 end of the proposed booking
        #[arg(long)]
        end: String,
        /// JSON array of existing bookings ({startUtc, endUtc})
        #[arg(short, long)]
        bookings: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DstArg {
    Reject,
    ShiftForward,
}

impl From<DstArg> for DstPolicy {
    fn from(arg: DstArg) -> Self {
        match arg {
            DstArg::Reject => DstPolicy::Reject,
            DstArg::ShiftForward => DstPolicy::ShiftForward,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Slots {
            hours,
            date,
            to,
            interval,
            bookings,
            available_only,
            json,
            dst_policy,
        } => {
            let raw = read_input(hours.as_deref())?;
            let business_hours =
                BusinessHours::from_json(&raw).context("Failed to load business hours")?;
            let bookings = match bookings {
                Some(path) => load_bookings(&path)?,
                None => Vec::new(),
            };

            let last = to.as_deref().unwrap_or(&date);
            let mut days = slot_engine::generate_slots_for_range(
                &date,
                last,
                &business_hours,
                interval,
                &bookings,
                dst_policy.into(),
            )
            .context("Failed to generate slots")?;

            if available_only {
                for day in &mut days {
                    day.slots = slot_engine::available_only(std::mem::take(&mut day.slots));
                }
            }

            tracing::info!(
                days = days.len(),
                bookings = bookings.len(),
                "generated availability"
            );

            if json {
                // A single date prints its slot array; a range prints one entry per date.
                let out = if to.is_some() {
                    serde_json::to_string_pretty(&days)?
                } else {
                    let slots = days.into_iter().next().map(|d| d.slots).unwrap_or_default();
                    serde_json::to_string_pretty(&slots)?
                };
                println!("{}", out);
            } else {
                print_table(&days);
            }
        }
        Commands::Convert {
            date,
            time,
            tz,
            dst_policy,
        } => {
            let utc = slot_engine::zoned_datetime_to_utc_with_policy(
                &date,
                &time,
                &tz,
                dst_policy.into(),
            )
            .with_context(|| format!("Failed to convert {} {} in {}", date, time, tz))?;
            println!("{}", utc.to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        Commands::Local { instant, tz } => {
            let utc = parse_instant(&instant)?;
            let local = slot_engine::utc_to_zoned_iso(utc, &tz)
                .with_context(|| format!("Failed to render {} in {}", instant, tz))?;
            println!("{}", local);
        }
        Commands::Check {
            start,
            end,
            bookings,
        } => {
            let start = parse_instant(&start)?;
            let end = parse_instant(&end)?;
            if start >= end {
                anyhow::bail!("--start must be before --end");
            }
            let bookings = load_bookings(&bookings)?;
            let conflicts = slot_engine::find_conflicts(start, end, &bookings);

            if conflicts.is_empty() {
                println!("No conflicts");
            } else {
                for c in &conflicts {
                    println!(
                        "Conflict: {} - {} ({} min overlap)",
                        c.booking.start_utc.to_rfc3339_opts(SecondsFormat::Secs, true),
                        c.booking.end_utc.to_rfc3339_opts(SecondsFormat::Secs, true),
                        c.overlap_minutes
                    );
                }
                anyhow::bail!("{} conflicting booking(s)", conflicts.len());
            }
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for piping.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn print_table(days: &[DayAvailability]) {
    for day in days {
        println!("{} ({})", day.ymd, day.ymd.weekday());
        if day.slots.is_empty() {
            println!("  no slots");
            continue;
        }
        for slot in &day.slots {
            println!(
                "  {:>8}  {}  {}",
                slot.local_label,
                slot.start_utc.to_rfc3339_opts(SecondsFormat::Secs, true),
                if slot.is_available { "available" } else { "booked" }
            );
        }
    }
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Invalid RFC 3339 instant: '{}'", s))
}

fn load_bookings(path: &str) -> Result<Vec<ExistingBooking>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid bookings JSON in {}", path))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
