//! Prelude module for convenient imports.

pub use crate::{
    ControlLoopDriver, DriverConfig, DriverConfigBuilder, MotionKind, MotionOutcome,
    MotionReport, MotionState, PartialReason,
};
pub use axi_servo_errors::{ServoError, ServoResult};
pub use axi_servo_logging::LoggingConfig;
pub use axi_servo_registers::{Axis, AxisStatus, GainSet};
