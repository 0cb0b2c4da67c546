//! daylog sample driver.
//!
//! Replays the reference logging scenario against a logger and clock: a
//! greeting, a hundred integer fragments, then a long run of attempts with the
//! clock stepped forward between calls so the output rolls across days.

pub mod error;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;
use daylog_core::clock::OverridableClock;
use daylog_core::date_key::{DateKey, KeyZone};
use daylog_logger::{Logger, LoggerConfig, log_to};

use crate::error::SampleError;

/// Timestamp of the opening greeting.
pub const GREETING_AT: i64 = 1_000_000;

/// Command-line arguments. Anything not given falls back to the `DAYLOG_*`
/// environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "daylog-sample", version, about = "Write the daylog sample scenario")]
pub struct SampleArgs {
    /// Directory for log files.
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Number of stepped attempts to log.
    #[arg(long, default_value_t = 100_000)]
    pub attempts: u32,

    /// Seconds since the epoch of the first attempt.
    #[arg(long, default_value_t = 10_000_000)]
    pub start: i64,

    /// Seconds the clock advances between attempts.
    #[arg(long, default_value_t = 100)]
    pub step: i64,

    /// Derive file dates in UTC instead of local time.
    #[arg(long)]
    pub utc: bool,

    /// Create the log directory if it is missing.
    #[arg(long)]
    pub create_dir: bool,
}

impl SampleArgs {
    /// Overlays the arguments on `config`.
    #[must_use]
    pub fn apply(&self, mut config: LoggerConfig) -> LoggerConfig {
        if let Some(dir) = &self.log_dir {
            config = config.with_log_dir(dir);
        }
        if self.utc {
            config = config.with_zone(KeyZone::Utc);
        }
        if self.create_dir {
            config = config.with_create_dir(true);
        }
        config
    }
}

/// What a run wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleReport {
    /// Total lines logged.
    pub lines: u64,
    /// Distinct days written, in the order they were first used.
    pub days: Vec<DateKey>,
}

impl SampleReport {
    fn record(&mut self, logger: &Logger) -> Result<(), SampleError> {
        self.lines += 1;
        if let Some(key) = logger.current_key()? {
            if self.days.last() != Some(&key) {
                self.days.push(key);
            }
        }
        Ok(())
    }
}

/// Runs the scenario, moving `clock` before each timed call, then shuts the
/// logger's destination down.
///
/// # Errors
///
/// Returns `SampleError::Log` if any log call fails and
/// `SampleError::Overflow`/`TimestampOutOfRange` if the stepped clock leaves
/// the representable range.
pub fn run(
    logger: &Logger,
    clock: &OverridableClock,
    args: &SampleArgs,
) -> Result<SampleReport, SampleError> {
    let mut report = SampleReport::default();

    clock.set_override(timestamp(GREETING_AT)?);
    log_to!(logger, "Hello ", "world ", 123)?;
    report.record(logger)?;

    let digits: Vec<u8> = (0..100u8).map(|i| (i + 1) % 10).collect();
    let fragments: Vec<&dyn std::fmt::Display> = digits
        .iter()
        .map(|d| d as &dyn std::fmt::Display)
        .collect();
    logger.log(&fragments)?;
    report.record(logger)?;

    clock.set_override(timestamp(args.start)?);
    log_to!(logger, "Brilliant logger.", " ", "I Love it")?;
    report.record(logger)?;

    for attempt in 0..args.attempts {
        let secs = i64::from(attempt)
            .checked_mul(args.step)
            .and_then(|offset| args.start.checked_add(offset))
            .ok_or(SampleError::Overflow { attempt })?;
        clock.set_override(timestamp(secs)?);
        log_to!(logger, "Logging attempt ", attempt, ". ", "I Love it")?;
        report.record(logger)?;
    }

    logger.shutdown()?;
    tracing::info!(lines = report.lines, days = report.days.len(), "sample run complete");
    Ok(report)
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>, SampleError> {
    DateTime::from_timestamp(secs, 0).ok_or(SampleError::TimestampOutOfRange(secs))
}
