//! Control loop driver for register-mapped servo axes.
//!
//! This crate ties the workspace together: a [`ControlLoopDriver`] owns a
//! register transport, a tick source and a log sink, and runs timed motions
//! over every configured axis.
//!
//! # Operations
//!
//! - [`ControlLoopDriver::run_motion`]: forward-and-return quintic motion to
//!   per-axis targets
//! - [`ControlLoopDriver::run_step_capture`]: step the setpoint once and
//!   record the response
//! - [`ControlLoopDriver::apply_gains`], [`ControlLoopDriver::status`],
//!   [`ControlLoopDriver::reset`], [`ControlLoopDriver::toggle_logging`],
//!   raw register access by number
//!
//! # Error handling
//!
//! Errors raised before a motion starts running (bad input, failing to read
//! the start position) are returned as `Err`. Once running, a register fault
//! stops the motion and a storage failure only stops logging; both are
//! reported in the [`MotionReport`].
//!
//! # Example
//!
//! ```
//! use axi_servo_driver::prelude::*;
//! use axi_servo_clock::TickSource;
//! use axi_servo_logging::MemoryLogSink;
//! use axi_servo_registers::MemoryRegisterBank;
//!
//! struct Stepping(u64);
//! impl TickSource for Stepping {
//!     fn now(&mut self) -> u64 {
//!         self.0 += 1;
//!         self.0
//!     }
//! }
//!
//! let config = DriverConfig::builder()
//!     .counter_hz(10_000)
//!     .command_hz(1_000)
//!     .phase_ms(5)
//!     .axes(Vec::new())
//!     .axis("x", 0x43C0_0000)
//!     .build()?;
//! let regs = MemoryRegisterBank::with_blocks([0x43C0_0000]);
//! let mut driver = ControlLoopDriver::new(regs, Stepping(0), MemoryLogSink::new(), config)?;
//!
//! driver.apply_gains(0, GainSet::new(10.5, 2.0, 0.75)?)?;
//! let report = driver.run_motion(&[1000])?;
//! assert!(report.outcome.is_complete());
//! assert_eq!(report.samples, 10);
//! # Ok::<(), axi_servo_errors::ServoError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod config;
pub mod driver;
pub mod motion;
pub mod prelude;

pub use config::{DriverConfig, DriverConfigBuilder};
pub use driver::ControlLoopDriver;
pub use motion::{MotionKind, MotionOutcome, MotionReport, MotionState, PartialReason};
