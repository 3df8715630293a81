//! Convenience re-exports for common test utilities.

pub use crate::init_tracing;
pub use crate::must::{must, must_some, must_with};
pub use crate::ticks::{ScriptedTicks, SharedTicks, SteppingTicks, TickProbe};

#[cfg(feature = "mock")]
pub use crate::mock::{FailingLogSink, FaultyRegisters, RecordingRegisters, RegisterWrite};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
