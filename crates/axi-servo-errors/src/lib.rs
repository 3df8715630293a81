//! Centralized error types for axi-servo
//!
//! This crate provides the error vocabulary shared by every axi-servo crate.
//! Errors fall into three operational classes that drive how a motion reacts:
//!
//! - [`validation`]: operator input outside accepted bounds (`OutOfRange`),
//!   rejected before any register is touched
//! - [`register`]: register bus failures (`RegisterIOFailure`), fatal to the
//!   motion in progress
//! - [`storage`]: log sink failures (`StorageUnavailable`), reported while the
//!   motion continues without logging
//!
//! [`common`] holds the top-level [`ServoError`] that wraps all of them.
//!
//! # RT Safety
//!
//! [`RegisterError`] is `Copy` and allocation-free so it can be produced and
//! carried from inside the control loop.
//!
//! # Example
//!
//! ```
//! use axi_servo_errors::prelude::*;
//!
//! fn check_gain(value: f32) -> ServoResult<f32> {
//!     if !(0.0..=127.996).contains(&value) {
//!         return Err(ValidationError::out_of_range("Kp", value, 0.0, 127.996).into());
//!     }
//!     Ok(value)
//! }
//!
//! assert!(check_gain(10.5).is_ok());
//! assert!(check_gain(-1.0).is_err());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod prelude;
pub mod register;
pub mod storage;
pub mod validation;

pub use common::{ErrorCategory, ErrorSeverity, ResultExt, ServoError};
pub use register::RegisterError;
pub use storage::StorageError;
pub use validation::ValidationError;

/// A specialized `Result` type for axi-servo operations.
pub type ServoResult<T> = std::result::Result<T, ServoError>;

/// A specialized `Result` type for register bus operations.
pub type RegisterResult<T = ()> = std::result::Result<T, RegisterError>;

/// A specialized `Result` type for log storage operations.
pub type StorageResult<T = ()> = std::result::Result<T, StorageError>;
