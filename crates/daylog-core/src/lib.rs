//! daylog core — shared abstractions.
//!
//! This crate defines the clock capability, the calendar-day key used to
//! select log destinations, line formatting, the destination traits and the
//! error type every daylog crate reports. It performs no file I/O.

pub mod clock;
pub mod date_key;
pub mod destination;
pub mod error;
pub mod line;
