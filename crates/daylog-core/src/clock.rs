//! Clock abstraction for determinism.

use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};

/// Abstraction over system time for deterministic behavior.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that reports real time until an override is set, then reports the
/// override until it is changed or cleared.
///
/// Writes go through an `RwLock`, so an override set on one thread is visible
/// to every `now()` call that starts after `set_override` returns.
///
/// The override has its own lock, separate from the logger's destination
/// mutex. The logger reads the clock while holding that mutex, so within one
/// log call the clock read, any rollover and the append are serialized
/// together; only `set_override` itself runs outside it.
#[derive(Debug, Default)]
pub struct OverridableClock {
    fixed: RwLock<Option<DateTime<Utc>>>,
}

impl OverridableClock {
    /// Creates a clock with no override.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock already pinned to `at`.
    #[must_use]
    pub fn fixed_at(at: DateTime<Utc>) -> Self {
        Self {
            fixed: RwLock::new(Some(at)),
        }
    }

    /// Pins every subsequent `now()` to `at`.
    pub fn set_override(&self, at: DateTime<Utc>) {
        *self.fixed.write().unwrap_or_else(PoisonError::into_inner) = Some(at);
    }

    /// Returns to reporting real time.
    pub fn clear_override(&self) {
        *self.fixed.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Returns the override, if one is set.
    pub fn override_value(&self) -> Option<DateTime<Utc>> {
        // The guarded value is `Copy`; a panic elsewhere cannot leave it torn.
        *self.fixed.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for OverridableClock {
    fn now(&self) -> DateTime<Utc> {
        self.override_value().unwrap_or_else(Utc::now)
    }
}
