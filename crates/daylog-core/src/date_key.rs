//! Calendar-day keys used to select a log destination.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};

use crate::error::LogError;

/// Which calendar a timestamp is projected onto before taking its date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyZone {
    /// The process's local time zone.
    #[default]
    Local,
    /// Coordinated Universal Time.
    Utc,
}

impl FromStr for KeyZone {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "utc" => Ok(Self::Utc),
            other => Err(LogError::Config(format!(
                "unknown date zone {other:?}, expected \"local\" or \"utc\""
            ))),
        }
    }
}

/// A calendar day. Displays as `YYYY_MM_DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey {
    /// Calendar year.
    pub year: i32,
    /// Month, `1..=12`.
    pub month: u32,
    /// Day of month, `1..=31`.
    pub day: u32,
}

impl DateKey {
    /// Derives the key for `at` as seen in `zone`.
    #[must_use]
    pub fn for_timestamp(at: DateTime<Utc>, zone: KeyZone) -> Self {
        match zone {
            KeyZone::Local => Self::in_timezone(at, &Local),
            KeyZone::Utc => Self::in_timezone(at, &Utc),
        }
    }

    /// Derives the key for `at` in an arbitrary time zone.
    #[must_use]
    pub fn in_timezone<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> Self {
        Self::from(at.with_timezone(tz).date_naive())
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}_{:02}_{:02}", self.year, self.month, self.day)
    }
}
