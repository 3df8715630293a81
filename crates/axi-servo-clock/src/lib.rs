//! Timing primitives for the axi-servo control loop.
//!
//! The loop runs as a busy poll against a free-running hardware counter.
//! This crate provides:
//!
//! - **TickSource**: the counter seam, so tests can script time
//! - **SampleClock**: counter ticks to milliseconds at a fixed frequency
//! - **CommandGate**: issue commands at most once per command period,
//!   independent of how fast the loop polls
//! - **WideningCounter**: promote a wrapping 32-bit counter to 64 bits
//! - **CommandTimingStats**: interval and lateness statistics per motion
//!
//! # RT-Safety Guarantees
//!
//! Every operation here is allocation-free, non-blocking and O(1).
//!
//! # Example
//!
//! ```
//! use axi_servo_clock::{CommandGate, SampleClock, TickSource};
//!
//! struct Fixed(u64);
//! impl TickSource for Fixed {
//!     fn now(&mut self) -> u64 {
//!         self.0
//!     }
//! }
//!
//! let mut clock = SampleClock::new(Fixed(250_000), 1_000_000)?;
//! let now = clock.now();
//! assert_eq!(clock.to_ms(now), 250);
//!
//! let mut gate = CommandGate::from_rates(1_000_000, 5_000)?;
//! gate.arm(0);
//! assert!(!gate.ready(199));
//! assert!(gate.ready(200));
//! # Ok::<(), axi_servo_clock::ClockError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]

pub mod clock;
pub mod error;
pub mod gate;
pub mod prelude;
pub mod source;
pub mod stats;
pub mod widening;

pub use clock::SampleClock;
pub use error::ClockError;
pub use gate::CommandGate;
pub use source::{HostTickSource, TickSource};
pub use stats::CommandTimingStats;
pub use widening::{Counter32, WideningCounter};

/// Default command rate of the control loop in Hz.
pub const DEFAULT_COMMAND_HZ: u32 = 5_000;

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1_000;
