//! Shared test utilities for axi-servo.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with good error messages and `#[track_caller]`
//! - [`ticks`] - Scripted and stepping tick sources
//! - [`mock`] - Recording and fault-injecting register banks and log sinks
//! - [`prelude`] - Convenience re-exports
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! axi-servo-test-helpers = { workspace = true }
//! ```
//!
//! ```rust,ignore
//! use axi_servo_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic)]

pub mod must;
pub mod prelude;
pub mod ticks;

#[cfg(feature = "mock")]
pub mod mock;

pub use must::*;

/// Install a test-friendly tracing subscriber once per process.
///
/// Honors `RUST_LOG`, defaulting to debug output for the axi-servo crates.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("axi_servo=debug"));
    // a subscriber from an earlier test is fine
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
