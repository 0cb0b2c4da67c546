//! The logger: picks the day's destination and appends formatted lines.

use std::fmt::{self, Display};
use std::sync::{Arc, Mutex, MutexGuard};

use daylog_core::clock::Clock;
use daylog_core::date_key::{DateKey, KeyZone};
use daylog_core::destination::DestinationProvider;
use daylog_core::error::LogError;
use daylog_core::line::LogLine;

use crate::application::config::{FlushPolicy, LoggerConfig};
use crate::domain::state::DestinationState;
use crate::infrastructure::file_destination::FileDestinationProvider;

/// Appends lines to one destination per calendar day.
///
/// Every call reads the clock, derives the day, rolls the destination over if
/// the day changed and writes the line, all while holding one mutex. Line
/// formatting happens before the lock is taken.
pub struct Logger {
    clock: Arc<dyn Clock>,
    provider: Box<dyn DestinationProvider>,
    zone: KeyZone,
    flush: FlushPolicy,
    state: Mutex<DestinationState>,
}

impl Logger {
    /// Creates a logger with local-time day keys that flushes every line.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, provider: Box<dyn DestinationProvider>) -> Self {
        Self {
            clock,
            provider,
            zone: KeyZone::default(),
            flush: FlushPolicy::default(),
            state: Mutex::new(DestinationState::new()),
        }
    }

    /// Creates a file-backed logger from `config`.
    #[must_use]
    pub fn from_config(config: &LoggerConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(clock, Box::new(FileDestinationProvider::from_config(config)))
            .with_zone(config.zone)
            .with_flush_policy(config.flush)
    }

    /// Sets the calendar used for day keys.
    #[must_use]
    pub fn with_zone(mut self, zone: KeyZone) -> Self {
        self.zone = zone;
        self
    }

    /// Sets when lines are flushed.
    #[must_use]
    pub fn with_flush_policy(mut self, flush: FlushPolicy) -> Self {
        self.flush = flush;
        self
    }

    /// Concatenates `fragments` into one line and appends it to today's
    /// destination.
    ///
    /// # Errors
    ///
    /// Returns `LogError::DestinationOpen` if the day's destination cannot be
    /// opened, `LogError::Write` if the append or flush fails and
    /// `LogError::LockPoisoned` if another writer panicked mid-write.
    pub fn log(&self, fragments: &[&dyn Display]) -> Result<(), LogError> {
        let line = LogLine::from_fragments(fragments);
        self.write_line(&line)
    }

    /// Appends an already formatted line to today's destination.
    ///
    /// A destination that fails a write is discarded; the next call opens it
    /// afresh.
    ///
    /// # Errors
    ///
    /// Same as [`Logger::log`].
    pub fn write_line(&self, line: &LogLine) -> Result<(), LogError> {
        let mut state = self.lock()?;
        let key = DateKey::for_timestamp(self.clock.now(), self.zone);

        let open = state.ensure_open(key, self.provider.as_ref())?;
        let destination = open.destination();
        let written = destination.write_line(line).and_then(|()| match self.flush {
            FlushPolicy::EveryLine => destination.flush(),
            FlushPolicy::OnRollover => Ok(()),
        });

        if let Err(e) = written {
            tracing::warn!(key = %key, error = %e, "discarding failed log destination");
            state.discard();
            return Err(e);
        }
        Ok(())
    }

    /// Flushes the open destination, if any.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Write` if flushing fails.
    pub fn flush(&self) -> Result<(), LogError> {
        self.lock()?.flush()
    }

    /// Flushes and closes the open destination. The next `log` call opens a
    /// destination again. Returns the day that was closed, if any.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Write` if the final flush fails; the destination is
    /// released regardless.
    pub fn shutdown(&self) -> Result<Option<DateKey>, LogError> {
        self.lock()?.close()
    }

    /// The day of the currently open destination.
    ///
    /// # Errors
    ///
    /// Returns `LogError::LockPoisoned` if a writer panicked mid-write.
    pub fn current_key(&self) -> Result<Option<DateKey>, LogError> {
        Ok(self.lock()?.key())
    }

    fn lock(&self) -> Result<MutexGuard<'_, DestinationState>, LogError> {
        self.state
            .lock()
            .map_err(|e| LogError::LockPoisoned(e.to_string()))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("zone", &self.zone)
            .field("flush", &self.flush)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Ok(state) = self.state.get_mut() {
            if let Err(e) = state.close() {
                tracing::warn!(error = %e, "failed to flush log destination on drop");
            }
        }
    }
}
