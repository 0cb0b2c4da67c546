//! Application layer: the logger itself, its configuration and the
//! process-wide instance.

pub mod config;
pub mod global;
pub mod logger;
