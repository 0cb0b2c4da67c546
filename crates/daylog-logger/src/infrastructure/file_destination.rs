//! Per-day log files on disk.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use daylog_core::date_key::DateKey;
use daylog_core::destination::{Destination, DestinationProvider};
use daylog_core::error::LogError;
use daylog_core::line::LogLine;

use crate::application::config::LoggerConfig;

/// Opens `<dir>/<prefix><YYYY_MM_DD>.<extension>` in append mode.
#[derive(Debug, Clone)]
pub struct FileDestinationProvider {
    dir: PathBuf,
    prefix: String,
    extension: String,
    create_dir: bool,
}

impl FileDestinationProvider {
    /// Creates a provider for files in `dir`.
    #[must_use]
    pub fn new(
        dir: impl AsRef<Path>,
        prefix: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            prefix: prefix.into(),
            extension: extension.into(),
            create_dir: false,
        }
    }

    /// Creates a provider from the file-related parts of `config`.
    #[must_use]
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self::new(&config.log_dir, config.prefix.clone(), config.extension.clone())
            .with_create_dir(config.create_dir)
    }

    /// Creates the directory on open instead of failing when it is missing.
    #[must_use]
    pub fn with_create_dir(mut self, create_dir: bool) -> Self {
        self.create_dir = create_dir;
        self
    }

    /// The directory files are written to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for `key`, e.g. `sample_log_1970_01_12.log`.
    #[must_use]
    pub fn file_name(&self, key: &DateKey) -> String {
        if self.extension.is_empty() {
            format!("{}{key}", self.prefix)
        } else {
            format!("{}{key}.{}", self.prefix, self.extension)
        }
    }

    /// Full path for `key`.
    #[must_use]
    pub fn path_for(&self, key: &DateKey) -> PathBuf {
        self.dir.join(self.file_name(key))
    }
}

impl DestinationProvider for FileDestinationProvider {
    fn open(&self, key: &DateKey) -> Result<Box<dyn Destination>, LogError> {
        if self.create_dir {
            fs::create_dir_all(&self.dir).map_err(|source| LogError::DestinationOpen {
                path: self.dir.clone(),
                source,
            })?;
        }

        let path = self.path_for(key);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LogError::DestinationOpen {
                path: path.clone(),
                source,
            })?;

        Ok(Box::new(FileDestination {
            path,
            writer: BufWriter::new(file),
        }))
    }
}

/// An open per-day file. Dropping it flushes best-effort and closes the handle.
#[derive(Debug)]
pub struct FileDestination {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileDestination {
    fn write_error(&self, source: std::io::Error) -> LogError {
        LogError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl Destination for FileDestination {
    fn write_line(&mut self, line: &LogLine) -> Result<(), LogError> {
        self.writer
            .write_all(line.as_bytes())
            .map_err(|e| self.write_error(e))
    }

    fn flush(&mut self) -> Result<(), LogError> {
        self.writer.flush().map_err(|e| self.write_error(e))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
