//! Test destinations — fake `DestinationProvider` implementations for tests.

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use daylog_core::date_key::DateKey;
use daylog_core::destination::{Destination, DestinationProvider};
use daylog_core::error::LogError;
use daylog_core::line::LogLine;

#[derive(Debug, Default)]
struct Journal {
    opened: Vec<DateKey>,
    closed: Vec<DateKey>,
    lines: Vec<(DateKey, String)>,
    flushes: usize,
}

/// A destination provider that records every open, line, flush and close in
/// memory. Clones share the same journal, so a test can keep one handle while
/// the logger owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingDestinationProvider {
    journal: Arc<Mutex<Journal>>,
}

impl RecordingDestinationProvider {
    /// Create a provider with an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys in the order their destinations were opened.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn opened_keys(&self) -> Vec<DateKey> {
        self.journal.lock().unwrap().opened.clone()
    }

    /// Keys in the order their destinations were released.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn closed_keys(&self) -> Vec<DateKey> {
        self.journal.lock().unwrap().closed.clone()
    }

    /// Every line written, without its newline, tagged with its day.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn lines(&self) -> Vec<(DateKey, String)> {
        self.journal.lock().unwrap().lines.clone()
    }

    /// Lines written to the destination for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn lines_for(&self, key: &DateKey) -> Vec<String> {
        self.journal
            .lock()
            .unwrap()
            .lines
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, line)| line.clone())
            .collect()
    }

    /// Number of explicit flushes across all destinations.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn flush_count(&self) -> usize {
        self.journal.lock().unwrap().flushes
    }
}

impl DestinationProvider for RecordingDestinationProvider {
    fn open(&self, key: &DateKey) -> Result<Box<dyn Destination>, LogError> {
        self.journal.lock().unwrap().opened.push(*key);
        Ok(Box::new(RecordingDestination {
            key: *key,
            journal: Arc::clone(&self.journal),
        }))
    }
}

#[derive(Debug)]
struct RecordingDestination {
    key: DateKey,
    journal: Arc<Mutex<Journal>>,
}

impl Destination for RecordingDestination {
    fn write_line(&mut self, line: &LogLine) -> Result<(), LogError> {
        self.journal
            .lock()
            .unwrap()
            .lines
            .push((self.key, line.content().to_owned()));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), LogError> {
        self.journal.lock().unwrap().flushes += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("memory:{}", self.key)
    }
}

impl Drop for RecordingDestination {
    fn drop(&mut self) {
        if let Ok(mut journal) = self.journal.lock() {
            journal.closed.push(self.key);
        }
    }
}

/// A destination provider whose `open` always fails with permission denied.
/// Useful for testing the open-failure path.
#[derive(Debug)]
pub struct FailingDestinationProvider;

impl DestinationProvider for FailingDestinationProvider {
    fn open(&self, key: &DateKey) -> Result<Box<dyn Destination>, LogError> {
        Err(LogError::DestinationOpen {
            path: PathBuf::from(format!("/unwritable/sample_log_{key}.log")),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        })
    }
}

/// A destination provider that opens successfully but whose destinations
/// reject every write and flush as if the disk were full.
#[derive(Debug, Clone, Default)]
pub struct FailingWriteDestinationProvider {
    opens: Arc<Mutex<usize>>,
}

impl FailingWriteDestinationProvider {
    /// Create a new failing-write provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of destinations opened so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn open_count(&self) -> usize {
        *self.opens.lock().unwrap()
    }
}

impl DestinationProvider for FailingWriteDestinationProvider {
    fn open(&self, key: &DateKey) -> Result<Box<dyn Destination>, LogError> {
        *self.opens.lock().unwrap() += 1;
        Ok(Box::new(FullDiskDestination { key: *key }))
    }
}

#[derive(Debug)]
struct FullDiskDestination {
    key: DateKey,
}

impl FullDiskDestination {
    fn error(&self) -> LogError {
        LogError::Write {
            path: PathBuf::from(self.describe()),
            source: io::Error::from(io::ErrorKind::StorageFull),
        }
    }
}

impl Destination for FullDiskDestination {
    fn write_line(&mut self, _line: &LogLine) -> Result<(), LogError> {
        Err(self.error())
    }

    fn flush(&mut self) -> Result<(), LogError> {
        Err(self.error())
    }

    fn describe(&self) -> String {
        format!("full-disk:{}", self.key)
    }
}
