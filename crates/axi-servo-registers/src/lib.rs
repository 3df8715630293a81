//! Register-level access to the servo controller IP.
//!
//! Each controlled axis is one instance of the position-controller IP block,
//! mapped at its own base address with four 32-bit registers:
//!
//! | Offset | Register | Direction (from software) |
//! |--------|----------|---------------------------|
//! | `0x00` | Kp/Ki packed gains | read/write |
//! | `0x04` | Kd gain | read/write |
//! | `0x08` | Actual position | read |
//! | `0x0C` | Desired position | read/write |
//!
//! The physical transport is abstracted behind [`RegisterInterface`]; this
//! crate only knows offsets, encodings and the per-axis operations built on
//! them. [`MemoryRegisterBank`] is a plain register file implementing the
//! trait, used on hosts without the hardware.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod axis;
pub mod bank;
pub mod gains;
pub mod interface;
pub mod map;

pub use axis::{Axis, AxisStatus};
pub use bank::MemoryRegisterBank;
pub use gains::{GainSet, GainWords};
pub use interface::RegisterInterface;
pub use map::{REGISTER_COUNT, RegisterIndex, RegisterOffset};

/// Signed position in hardware-native units.
pub type Position = i32;

/// Reinterpret a register word as a two's-complement position.
#[inline]
pub fn word_to_position(word: u32) -> Position {
    word.cast_signed()
}

/// Reinterpret a position as the register word written to hardware.
#[inline]
pub fn position_to_word(position: Position) -> u32 {
    position.cast_unsigned()
}
