//! Destination abstractions.
//!
//! A destination is the single open sink for one calendar day. Providers
//! create destinations on demand; tests substitute in-memory providers.

use std::fmt::Debug;

use crate::date_key::DateKey;
use crate::error::LogError;
use crate::line::LogLine;

/// An open, append-only sink for one day's log lines.
pub trait Destination: Debug + Send {
    /// Appends `line` as one contiguous write.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Write` if the underlying sink rejects the bytes.
    fn write_line(&mut self, line: &LogLine) -> Result<(), LogError>;

    /// Pushes buffered bytes to the underlying sink.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Write` if flushing fails.
    fn flush(&mut self) -> Result<(), LogError>;

    /// Human-readable location, used in diagnostics.
    fn describe(&self) -> String;
}

/// Opens the destination for a given day.
pub trait DestinationProvider: Send + Sync {
    /// Opens (creating if absent) the destination for `key` in append mode.
    ///
    /// # Errors
    ///
    /// Returns `LogError::DestinationOpen` if the destination cannot be
    /// created or opened.
    fn open(&self, key: &DateKey) -> Result<Box<dyn Destination>, LogError>;
}
