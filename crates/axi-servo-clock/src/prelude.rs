//! Prelude module for convenient imports.

pub use crate::{
    ClockError, CommandGate, CommandTimingStats, Counter32, DEFAULT_COMMAND_HZ, HostTickSource,
    SampleClock, TickSource, WideningCounter,
};
