//! The process-wide logger and clock.
//!
//! The instance is created on first access from the environment
//! configuration and the process-wide [`OverridableClock`]. Statics are never
//! dropped, so callers that need the last lines on disk call [`shutdown`].

use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use daylog_core::clock::OverridableClock;
use daylog_core::date_key::DateKey;
use daylog_core::error::LogError;

use crate::application::config::LoggerConfig;
use crate::application::logger::Logger;

static CLOCK: OnceLock<Arc<OverridableClock>> = OnceLock::new();
static INSTANCE: OnceLock<Logger> = OnceLock::new();

/// The clock used by the default process-wide logger.
pub fn global_clock() -> &'static Arc<OverridableClock> {
    CLOCK.get_or_init(|| Arc::new(OverridableClock::new()))
}

/// Pins the process-wide clock to `at` for every later log call.
pub fn set_timestamp(at: DateTime<Utc>) {
    global_clock().set_override(at);
}

/// Returns the process-wide clock to real time.
pub fn clear_timestamp() {
    global_clock().clear_override();
}

/// Flushes and closes the process-wide logger's destination, if the logger
/// has been created. Returns the day that was closed.
///
/// # Errors
///
/// Returns `LogError::Write` if the final flush fails.
pub fn shutdown() -> Result<Option<DateKey>, LogError> {
    match INSTANCE.get() {
        Some(logger) => logger.shutdown(),
        None => Ok(None),
    }
}

impl Logger {
    /// Returns the process-wide logger, creating it on first call.
    ///
    /// Concurrent first calls construct exactly one instance.
    pub fn instance() -> &'static Logger {
        INSTANCE.get_or_init(default_logger)
    }

    /// Returns the process-wide logger only if it already exists.
    pub fn try_instance() -> Option<&'static Logger> {
        INSTANCE.get()
    }

    /// Makes `logger` the process-wide instance. Must happen before the first
    /// call to [`Logger::instance`].
    ///
    /// # Errors
    ///
    /// Returns `LogError::AlreadyInitialized` if an instance already exists;
    /// `logger` is dropped in that case.
    pub fn install(logger: Logger) -> Result<&'static Logger, LogError> {
        let mut candidate = Some(logger);
        let installed = INSTANCE.get_or_init(|| candidate.take().unwrap_or_else(default_logger));
        match candidate {
            None => Ok(installed),
            Some(_) => Err(LogError::AlreadyInitialized),
        }
    }
}

fn default_logger() -> Logger {
    let config = LoggerConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid logger configuration, using defaults");
        LoggerConfig::default()
    });
    tracing::debug!(dir = %config.log_dir.display(), "creating process-wide logger");
    Logger::from_config(&config, global_clock().clone())
}
