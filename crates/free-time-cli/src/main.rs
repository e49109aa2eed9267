//! `free-time` CLI — capacity reports, slot allocation and reading plans over
//! JSON.
//!
//! All instants are UTC epoch milliseconds.
//!
//! ## Usage
//!
//! ```sh
//! # Remaining work/personal time for the 5 days starting at `anchor`
//! echo '{"anchor":1773651600000,"busy":[{"start":1773655200000,"end":1773658800000}]}' \
//!   | free-time capacity
//!
//! # Allocate 90 minutes against a list of free intervals
//! free-time allocate -i free.json
//!
//! # Plan time to read unread mail, with a custom config file
//! free-time plan -i calendar.json --config free-time.json --words-per-minute 80
//!
//! # Show what the engine is doing
//! RUST_LOG=free_time_engine=debug free-time capacity -i busy.json
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use free_time_engine::interval::total_duration;
use free_time_engine::{
    allocate, plan_reading, CalendarEvent, CapacitySnapshot, PlanConfig, TimeInterval, Tracker,
    TrackerConfig,
};
use serde::{Deserialize, Serialize};
use std::io::{self, Read};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "free-time",
    version,
    about = "Work/personal free-time accounting and slot allocation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter used when RUST_LOG is unset (e.g. "debug", "free_time_engine=trace")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Report remaining capacity and free intervals for a window of days
    Capacity {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// JSON config file with `tracker` and `plan` sections
        #[arg(long)]
        config: Option<String>,
    },
    /// Allocate a required duration against free intervals
    Allocate {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Propose work-time slots for reading unread mail
    Plan {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// JSON config file with `tracker` and `plan` sections
        #[arg(long)]
        config: Option<String>,
        /// Reading speed, overrides the config file
        #[arg(long)]
        words_per_minute: Option<u32>,
    },
}

/// Contents of `--config`. Both sections are optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CliConfig {
    tracker: TrackerConfig,
    plan: PlanConfig,
}

#[derive(Deserialize)]
struct CapacityInput {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    anchor: DateTime<Utc>,
    #[serde(default)]
    busy: Vec<TimeInterval>,
}

#[derive(Serialize)]
struct CapacityOutput {
    snapshot: CapacitySnapshot,
    free_intervals: Vec<TimeInterval>,
}

#[derive(Deserialize)]
struct AllocateInput {
    free: Vec<TimeInterval>,
    need_ms: i64,
}

#[derive(Serialize)]
struct AllocateOutput {
    slots: Vec<TimeInterval>,
    allocated_ms: i64,
    shortfall_ms: i64,
}

#[derive(Deserialize)]
struct PlanInput {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    anchor: DateTime<Utc>,
    word_count: u32,
    #[serde(default)]
    events: Vec<CalendarEvent>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Capacity {
            input,
            output,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let request: CapacityInput = parse_json(&read_input(input.as_deref())?)?;

            let mut tracker = Tracker::with_config(request.anchor, config.tracker)
                .context("Invalid tracker configuration")?;
            for busy in &request.busy {
                match tracker.clamp_to_window(busy) {
                    Some(clamped) => {
                        tracker.apply_busy_interval(&clamped)?;
                    }
                    None => debug!(start = %busy.start(), end = %busy.end(), "outside window"),
                }
            }

            let report = CapacityOutput {
                snapshot: tracker.snapshot(),
                free_intervals: tracker.free_intervals(),
            };
            write_json(output.as_deref(), &report)?;
        }
        Commands::Allocate { input, output } => {
            let request: AllocateInput = parse_json(&read_input(input.as_deref())?)?;
            let need = Duration::try_milliseconds(request.need_ms)
                .with_context(|| format!("need_ms out of range: {}", request.need_ms))?;

            let slots = allocate(&request.free, need);
            let allocated = total_duration(&slots);
            let shortfall = (need - allocated).max(Duration::zero());
            if shortfall > Duration::zero() {
                info!(
                    shortfall_ms = shortfall.num_milliseconds(),
                    "not enough free time for the full request"
                );
            }

            let report = AllocateOutput {
                slots,
                allocated_ms: allocated.num_milliseconds(),
                shortfall_ms: shortfall.num_milliseconds(),
            };
            write_json(output.as_deref(), &report)?;
        }
        Commands::Plan {
            input,
            output,
            config,
            words_per_minute,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(wpm) = words_per_minute {
                config.plan.words_per_minute = wpm;
            }
            let request: PlanInput = parse_json(&read_input(input.as_deref())?)?;

            let plan = plan_reading(
                request.anchor,
                &request.events,
                request.word_count,
                &config.plan,
                config.tracker,
            )
            .context("Failed to plan reading time")?;
            write_json(output.as_deref(), &plan)?;
        }
    }

    Ok(())
}

/// Install a stderr subscriber so log lines never mix with JSON on stdout.
fn init_tracing(default_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .with_context(|| format!("Invalid log level: {}", default_level))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))
}

fn load_config(path: Option<&str>) -> Result<CliConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse config file: {}", path))
        }
        None => Ok(CliConfig::default()),
    }
}

fn parse_json<T: for<'de> Deserialize<'de>>(raw: &str) -> Result<T> {
    serde_json::from_str(raw).context("Failed to parse input JSON")
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

fn write_json<T: Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
