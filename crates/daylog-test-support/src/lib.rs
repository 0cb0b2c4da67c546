//! Shared test clocks and fake destinations for daylog.

mod clock;
mod destination;

pub use clock::{FixedClock, SteppingClock};
pub use destination::{
    FailingDestinationProvider, FailingWriteDestinationProvider, RecordingDestinationProvider,
};
