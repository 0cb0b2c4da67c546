//! Sample driver error types.

use daylog_core::error::LogError;
use thiserror::Error;

/// Errors raised while running the sample scenario.
#[derive(Debug, Error)]
pub enum SampleError {
    /// Logging failed.
    #[error(transparent)]
    Log(#[from] LogError),

    /// A computed timestamp does not fit the calendar.
    #[error("timestamp out of range: {0}s since the epoch")]
    TimestampOutOfRange(i64),

    /// `start + attempt * step` overflowed.
    #[error("attempt {attempt} overflows the timestamp range")]
    Overflow {
        /// Index of the attempt that overflowed.
        attempt: u32,
    },
}
