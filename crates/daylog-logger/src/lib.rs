//! daylog — a process-wide logger writing one file per calendar day.
//!
//! Each call concatenates its fragments with no separator, derives the day
//! from an injectable clock, and appends the line to that day's file
//! (`sample_log_YYYY_MM_DD.log` by default), rolling over when the day
//! changes.
//!
//! ```no_run
//! use chrono::{TimeZone, Utc};
//!
//! daylog_logger::set_timestamp(Utc.timestamp_opt(1_000_000, 0).unwrap());
//! daylog_logger::log!("Hello ", "world ", 123)?;
//! daylog_logger::shutdown()?;
//! # Ok::<(), daylog_logger::LogError>(())
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::config::{FlushPolicy, LoggerConfig};
pub use application::global::{clear_timestamp, global_clock, set_timestamp, shutdown};
pub use application::logger::Logger;
pub use infrastructure::file_destination::FileDestinationProvider;

pub use daylog_core::date_key::{DateKey, KeyZone};
pub use daylog_core::error::LogError;

/// Logs any number of `Display` values through the process-wide logger.
///
/// Evaluates to `Result<(), LogError>`.
#[macro_export]
macro_rules! log {
    ($($fragment:expr),* $(,)?) => {
        $crate::Logger::instance().log(&[$(&$fragment as &dyn ::std::fmt::Display),*])
    };
}

/// Logs any number of `Display` values through the given logger.
///
/// Evaluates to `Result<(), LogError>`.
#[macro_export]
macro_rules! log_to {
    ($logger:expr $(, $fragment:expr)* $(,)?) => {
        $logger.log(&[$(&$fragment as &dyn ::std::fmt::Display),*])
    };
}
