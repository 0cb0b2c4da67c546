//! Domain types for the logger.

pub mod state;
