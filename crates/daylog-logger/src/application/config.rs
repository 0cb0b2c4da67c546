//! Logger configuration, read from the environment.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use daylog_core::date_key::KeyZone;
use daylog_core::error::LogError;

/// Default directory for log files.
pub const DEFAULT_LOG_DIR: &str = "/var/log";
/// Default file name prefix; the date key follows it.
pub const DEFAULT_PREFIX: &str = "sample_log_";
/// Default file extension.
pub const DEFAULT_EXTENSION: &str = "log";

/// When buffered bytes are pushed to the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlushPolicy {
    /// Flush after every line, so write failures surface on the call that
    /// caused them.
    #[default]
    EveryLine,
    /// Buffer until rollover, `flush` or `shutdown`.
    OnRollover,
}

impl FromStr for FlushPolicy {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(Self::EveryLine),
            "rollover" => Ok(Self::OnRollover),
            other => Err(LogError::Config(format!(
                "unknown flush policy {other:?}, expected \"line\" or \"rollover\""
            ))),
        }
    }
}

/// Where and how the logger writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Directory holding the per-day files.
    pub log_dir: PathBuf,
    /// File name prefix, e.g. `sample_log_`.
    pub prefix: String,
    /// File extension without the dot.
    pub extension: String,
    /// Flushing behavior.
    pub flush: FlushPolicy,
    /// Calendar used to derive the date key.
    pub zone: KeyZone,
    /// Create `log_dir` if it does not exist instead of failing.
    pub create_dir: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            prefix: DEFAULT_PREFIX.to_owned(),
            extension: DEFAULT_EXTENSION.to_owned(),
            flush: FlushPolicy::default(),
            zone: KeyZone::default(),
            create_dir: false,
        }
    }
}

impl LoggerConfig {
    /// Reads `DAYLOG_DIR`, `DAYLOG_PREFIX`, `DAYLOG_EXT`, `DAYLOG_FLUSH`,
    /// `DAYLOG_ZONE` and `DAYLOG_CREATE_DIR`, falling back to defaults for
    /// anything unset.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, LogError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`LoggerConfig::from_env`] with a custom variable source.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Config` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LogError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(dir) = lookup("DAYLOG_DIR") {
            if dir.trim().is_empty() {
                return Err(LogError::Config("DAYLOG_DIR must not be empty".into()));
            }
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(prefix) = lookup("DAYLOG_PREFIX") {
            config.prefix = prefix;
        }
        if let Some(extension) = lookup("DAYLOG_EXT") {
            config.extension = extension.trim_start_matches('.').to_owned();
        }
        if let Some(flush) = lookup("DAYLOG_FLUSH") {
            config.flush = flush.parse()?;
        }
        if let Some(zone) = lookup("DAYLOG_ZONE") {
            config.zone = zone.parse()?;
        }
        if let Some(create) = lookup("DAYLOG_CREATE_DIR") {
            config.create_dir = parse_bool("DAYLOG_CREATE_DIR", &create)?;
        }
        Ok(config)
    }

    /// Sets the log directory.
    #[must_use]
    pub fn with_log_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.log_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Sets the file name prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the flush policy.
    #[must_use]
    pub fn with_flush(mut self, flush: FlushPolicy) -> Self {
        self.flush = flush;
        self
    }

    /// Sets the date-key calendar.
    #[must_use]
    pub fn with_zone(mut self, zone: KeyZone) -> Self {
        self.zone = zone;
        self
    }

    /// Allows creating the log directory on first open.
    #[must_use]
    pub fn with_create_dir(mut self, create_dir: bool) -> Self {
        self.create_dir = create_dir;
        self
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, LogError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(LogError::Config(format!(
            "{name} must be a boolean, got {other:?}"
        ))),
    }
}
