//! Q7.8 fixed-point gain codec.
//!
//! The position controller in programmable logic takes its PID gains as
//! 15-bit unsigned fixed-point values with 8 fractional bits. This crate is
//! pure and I/O-free: it converts between real gains and register codes and
//! packs the Kp/Ki pair into the shared 32-bit control word.
//!
//! # Register layout
//!
//! ```text
//!  31  30           16  15  14            0
//! +---+---------------+---+---------------+
//! | 0 |   Ki (Q7.8)   | 0 |   Kp (Q7.8)   |   offset 0x00
//! +---+---------------+---+---------------+
//! |           reserved    |   Kd (Q7.8)   |   offset 0x04
//! +-----------------------+---------------+
//! ```
//!
//! # Example
//!
//! ```
//! use axi_servo_fixed_point::{Q78, pack_gain_pair, unpack_gain_pair};
//!
//! let kp = Q78::from_gain(10.5);
//! let ki = Q78::from_gain(2.0);
//! assert_eq!(kp.raw(), 2688);
//! assert_eq!(ki.raw(), 512);
//!
//! let word = pack_gain_pair(kp, ki);
//! assert_eq!(word, (512 << 16) | 2688);
//! assert_eq!(unpack_gain_pair(word), (kp, ki));
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod codec;

pub use codec::{
    FRACTIONAL_BITS, GAIN_MAX, GAIN_MIN, Q78, Q78_MASK, SCALE, decode, encode, pack_gain_pair,
    unpack_gain_pair,
};
