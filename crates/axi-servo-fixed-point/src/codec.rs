//! Encoding and decoding of Q7.8 gain codes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Number of fractional bits in a gain code.
pub const FRACTIONAL_BITS: u32 = 8;

/// Scale factor between a real gain and its code (`2^FRACTIONAL_BITS`).
pub const SCALE: f32 = 256.0;

/// Mask selecting the 15 significant bits of a gain code.
pub const Q78_MASK: u16 = 0x7FFF;

/// Smallest representable gain. Negative gains are not representable.
pub const GAIN_MIN: f32 = 0.0;

/// Largest gain accepted by the operator interface.
pub const GAIN_MAX: f32 = 127.996;

/// A 15-bit unsigned Q7.8 gain code.
///
/// The inner value is always masked to 15 bits, so a `Q78` can be placed in
/// either half of the Kp/Ki word without touching the reserved bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Q78(u16);

impl Q78 {
    /// Code for a gain of zero.
    pub const ZERO: Q78 = Q78(0);

    /// Code of [`GAIN_MAX`], the saturation point of [`Q78::from_gain`].
    pub const MAX: Q78 = Q78(32766);

    /// Encode a real gain, saturating to `[GAIN_MIN, GAIN_MAX]`.
    ///
    /// The scaled value is truncated toward zero. `NaN` encodes as zero.
    #[inline]
    pub fn from_gain(value: f32) -> Self {
        Q78(encode(value))
    }

    /// Wrap a raw register code, discarding bits above bit 14.
    #[inline]
    pub const fn from_raw(code: u16) -> Self {
        Q78(code & Q78_MASK)
    }

    /// The 15-bit register code.
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Decode back to a real gain.
    #[inline]
    pub fn to_gain(self) -> f32 {
        decode(self.0)
    }
}

impl fmt::Display for Q78 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.to_gain())
    }
}

/// Encode a real gain into a 15-bit Q7.8 code.
///
/// Values below zero encode as 0, values above [`GAIN_MAX`] encode as the code
/// of `GAIN_MAX` (32766). The input is clamped before scaling, so the result
/// never wraps; the final mask keeps the code register-compatible.
///
/// # Examples
///
/// ```
/// use axi_servo_fixed_point::encode;
///
/// assert_eq!(encode(0.75), 192);
/// assert_eq!(encode(-3.0), 0);
/// assert_eq!(encode(500.0), 32766);
/// ```
#[inline]
pub fn encode(value: f32) -> u16 {
    if value.is_nan() {
        return 0;
    }
    let clamped = value.clamp(GAIN_MIN, GAIN_MAX);
    // clamped * SCALE lies in [0, 32767), so the cast cannot saturate
    let scaled = (clamped * SCALE).trunc() as u16;
    scaled & Q78_MASK
}

/// Decode a Q7.8 code into a real gain. Bits above bit 14 are ignored.
#[inline]
pub fn decode(code: u16) -> f32 {
    f32::from(code & Q78_MASK) / SCALE
}

/// Pack Kp and Ki into the shared control word: Ki in bits `[30:16]`, Kp in
/// bits `[14:0]`. Bits 15 and 31 are always zero.
#[inline]
pub fn pack_gain_pair(kp: Q78, ki: Q78) -> u32 {
    (u32::from(ki.raw()) << 16) | u32::from(kp.raw())
}

/// Split the shared control word into `(kp, ki)`, ignoring reserved bits.
#[inline]
pub fn unpack_gain_pair(word: u32) -> (Q78, Q78) {
    let kp = (word & u32::from(Q78_MASK)) as u16;
    let ki = ((word >> 16) & u32::from(Q78_MASK)) as u16;
    (Q78::from_raw(kp), Q78::from_raw(ki))
}
