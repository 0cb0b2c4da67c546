//! File-backed destinations.

pub mod file_destination;
