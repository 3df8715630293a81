//! Quintic trajectory planning for axi-servo motions
//!
//! Motions are built from minimum-jerk segments: a fifth-degree blend
//! `6τ⁵ − 15τ⁴ + 10τ³` between a start and an end position, so velocity and
//! acceleration are zero at both ends of every segment.
//!
//! # Overview
//!
//! - [`position_at`]: pure evaluation of one segment at an elapsed time
//! - [`TrajectorySegment`]: an immutable `{start, end, duration_ms}` triple
//! - [`MotionProfile`]: an ordered sequence of segments run back to back,
//!   such as the forward-and-return motion used for tuning
//!
//! # RT Safety
//!
//! Evaluation is allocation-free and runs in bounded time. Building a
//! [`MotionProfile`] allocates and should happen before the control loop
//! starts.
//!
//! # Example
//!
//! ```
//! use axi_servo_trajectory::MotionProfile;
//!
//! let profile = MotionProfile::forward_and_return(0, 1000, 1000);
//! assert_eq!(profile.total_duration_ms(), 2000);
//! assert_eq!(profile.position_at(0), 0);
//! assert_eq!(profile.position_at(500), 500);
//! assert_eq!(profile.position_at(1000), 1000);
//! assert_eq!(profile.position_at(2000), 0);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod profile;
pub mod quintic;
pub mod segment;

pub use error::TrajectoryError;
pub use profile::MotionProfile;
pub use quintic::{blend, position_at};
pub use segment::TrajectorySegment;
