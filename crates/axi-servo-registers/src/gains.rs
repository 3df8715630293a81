//! PID gain sets and their register encoding.

use core::fmt;

use axi_servo_errors::ValidationError;
use axi_servo_fixed_point::{GAIN_MAX, GAIN_MIN, Q78, pack_gain_pair, unpack_gain_pair};
use serde::{Deserialize, Serialize};

/// The two register words carrying a gain set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GainWords {
    /// Word for the Kp/Ki register
    pub kpki: u32,
    /// Word for the Kd register
    pub kd: u32,
}

/// Proportional, integral and derivative gains for one axis.
///
/// Gains built with [`GainSet::new`] are finite and inside
/// `[GAIN_MIN, GAIN_MAX]`, so encoding them never saturates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GainSet {
    /// Proportional gain
    pub kp: f32,
    /// Integral gain
    pub ki: f32,
    /// Derivative gain
    pub kd: f32,
}

impl GainSet {
    /// All gains zero.
    pub const ZERO: GainSet = GainSet {
        kp: 0.0,
        ki: 0.0,
        kd: 0.0,
    };

    /// Build a validated gain set.
    ///
    /// # Errors
    ///
    /// Returns `NotFinite` for NaN or infinite gains and `OutOfRange` for gains
    /// outside `[0, 127.996]`.
    pub fn new(kp: f32, ki: f32, kd: f32) -> Result<Self, ValidationError> {
        let gains = Self { kp, ki, kd };
        gains.validate()?;
        Ok(gains)
    }

    /// Check every gain against the representable range.
    ///
    /// # Errors
    ///
    /// See [`GainSet::new`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [("Kp", self.kp), ("Ki", self.ki), ("Kd", self.kd)] {
            if !value.is_finite() {
                return Err(ValidationError::not_finite(field));
            }
            if !(GAIN_MIN..=GAIN_MAX).contains(&value) {
                return Err(ValidationError::out_of_range(
                    field, value, GAIN_MIN, GAIN_MAX,
                ));
            }
        }
        Ok(())
    }

    /// Encode into register words.
    pub fn to_words(&self) -> GainWords {
        GainWords {
            kpki: pack_gain_pair(Q78::from_gain(self.kp), Q78::from_gain(self.ki)),
            kd: u32::from(Q78::from_gain(self.kd).raw()),
        }
    }

    /// Decode gains from register words, ignoring reserved bits.
    pub fn from_words(words: GainWords) -> Self {
        let (kp, ki) = unpack_gain_pair(words.kpki);
        let kd = Q78::from_raw((words.kd & 0xFFFF) as u16);
        Self {
            kp: kp.to_gain(),
            ki: ki.to_gain(),
            kd: kd.to_gain(),
        }
    }

    /// The gains as the hardware will hold them after encoding.
    pub fn quantized(&self) -> Self {
        Self::from_words(self.to_words())
    }
}

impl fmt::Display for GainSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Kp={:.3} Ki={:.3} Kd={:.3}",
            self.kp, self.ki, self.kd
        )
    }
}
