//! The open/closed state of the logger's single destination.
//!
//! ```text
//! Closed       --open(d)-------> Open(d)
//! Open(d)      --log d---------> Open(d)    append only
//! Open(d1)     --log d2 != d1--> Open(d2)   flush and close d1, open d2
//! Open(d)      --close---------> Closed     flush and release
//! Open(d)      --discard-------> Closed     release after a failed write
//! ```

use daylog_core::date_key::DateKey;
use daylog_core::destination::{Destination, DestinationProvider};
use daylog_core::error::LogError;

/// The destination currently accepting lines, tagged with its day.
#[derive(Debug)]
pub struct OpenDestination {
    key: DateKey,
    destination: Box<dyn Destination>,
}

impl OpenDestination {
    /// The day this destination belongs to.
    #[must_use]
    pub fn key(&self) -> DateKey {
        self.key
    }

    /// Mutable access to the sink.
    pub fn destination(&mut self) -> &mut dyn Destination {
        self.destination.as_mut()
    }
}

/// At most one open destination. `None` is the closed state.
#[derive(Debug, Default)]
pub struct DestinationState {
    open: Option<OpenDestination>,
}

impl DestinationState {
    /// Starts closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The day of the open destination, if any.
    #[must_use]
    pub fn key(&self) -> Option<DateKey> {
        self.open.as_ref().map(OpenDestination::key)
    }

    /// Whether a destination is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Returns the destination for `key`, rolling over from any other day.
    ///
    /// The previous destination is always released before the new one is
    /// opened. If either the flush of the old destination or the open of the
    /// new one fails, the state is left closed.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Write` if flushing the previous destination fails and
    /// `LogError::DestinationOpen` if the new destination cannot be opened.
    pub fn ensure_open(
        &mut self,
        key: DateKey,
        provider: &dyn DestinationProvider,
    ) -> Result<&mut OpenDestination, LogError> {
        let open = match self.open.take() {
            Some(open) if open.key == key => open,
            previous => {
                if let Some(previous) = previous {
                    tracing::debug!(
                        from = %previous.key,
                        to = %key,
                        "rolling over log destination"
                    );
                    release(previous)?;
                }
                let destination = provider.open(&key)?;
                tracing::debug!(
                    key = %key,
                    destination = %destination.describe(),
                    "opened log destination"
                );
                OpenDestination { key, destination }
            }
        };
        Ok(self.open.insert(open))
    }

    /// Flushes the open destination without closing it.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Write` if flushing fails.
    pub fn flush(&mut self) -> Result<(), LogError> {
        match self.open.as_mut() {
            Some(open) => open.destination.flush(),
            None => Ok(()),
        }
    }

    /// Flushes and releases the open destination. Returns the day that was
    /// closed, if any.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Write` if the final flush fails; the destination is
    /// released regardless.
    pub fn close(&mut self) -> Result<Option<DateKey>, LogError> {
        match self.open.take() {
            Some(open) => {
                let key = open.key;
                release(open)?;
                tracing::debug!(key = %key, "closed log destination");
                Ok(Some(key))
            }
            None => Ok(None),
        }
    }

    /// Releases the open destination without calling `Destination::flush`, so
    /// no error from it is reported. Used after a failed write. A destination
    /// may still push buffered bytes when dropped, as file destinations do.
    pub fn discard(&mut self) {
        if let Some(open) = self.open.take() {
            tracing::debug!(key = %open.key, "discarded log destination");
        }
    }
}

// Consumes the destination so its handle is dropped on every path.
fn release(mut open: OpenDestination) -> Result<(), LogError> {
    open.destination.flush()
}
