//! Logging error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for every daylog operation.
#[derive(Debug, Error)]
pub enum LogError {
    /// The destination file (or its directory) could not be created or opened.
    #[error("cannot open log destination {}: {source}", path.display())]
    DestinationOpen {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// Appending to or flushing an open destination failed.
    #[error("cannot write to log destination {}: {source}", path.display())]
    Write {
        /// Path of the open destination.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// A configuration value is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A writer panicked while holding the destination lock.
    #[error("destination lock poisoned: {0}")]
    LockPoisoned(String),

    /// The process-wide logger was already created.
    #[error("logger already initialized")]
    AlreadyInitialized,
}

impl LogError {
    /// Returns the underlying I/O error, if this is an I/O failure.
    #[must_use]
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::DestinationOpen { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Config(_) | Self::LockPoisoned(_) | Self::AlreadyInitialized => None,
        }
    }
}
