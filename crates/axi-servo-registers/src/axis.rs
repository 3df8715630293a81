//! Per-axis register operations.

use core::fmt;

use axi_servo_errors::RegisterResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::gains::{GainSet, GainWords};
use crate::interface::RegisterInterface;
use crate::map::{RegisterIndex, RegisterOffset};
use crate::{Position, position_to_word, word_to_position};

/// One controlled axis: a named controller block at a fixed base address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Axis {
    /// Human-readable axis name, used in logs and status output
    pub name: String,
    /// Base address of the axis register block
    pub base_address: u32,
}

impl Axis {
    /// Create an axis.
    pub fn new(name: impl Into<String>, base_address: u32) -> Self {
        Self {
            name: name.into(),
            base_address,
        }
    }

    fn write(
        &self,
        regs: &mut impl RegisterInterface,
        offset: RegisterOffset,
        value: u32,
    ) -> RegisterResult {
        regs.write32(self.base_address, offset.bytes(), value)
    }

    fn read(&self, regs: &mut impl RegisterInterface, offset: RegisterOffset) -> RegisterResult<u32> {
        regs.read32(self.base_address, offset.bytes())
    }

    /// Encode and write a gain set: Kp/Ki word first, then Kd.
    ///
    /// # Errors
    ///
    /// Returns the first register failure; the Kd write is skipped if the
    /// Kp/Ki write fails.
    pub fn write_gains(&self, regs: &mut impl RegisterInterface, gains: &GainSet) -> RegisterResult {
        let words = gains.to_words();
        debug!(
            axis = %self.name,
            kpki = format_args!("{:#010x}", words.kpki),
            kd = format_args!("{:#06x}", words.kd),
            "writing gains"
        );
        self.write(regs, RegisterOffset::KpKi, words.kpki)?;
        self.write(regs, RegisterOffset::Kd, words.kd)
    }

    /// Read back and decode the gains held by hardware.
    ///
    /// # Errors
    ///
    /// Returns the first register failure.
    pub fn read_gains(&self, regs: &mut impl RegisterInterface) -> RegisterResult<GainSet> {
        let kpki = self.read(regs, RegisterOffset::KpKi)?;
        let kd = self.read(regs, RegisterOffset::Kd)?;
        Ok(GainSet::from_words(GainWords { kpki, kd }))
    }

    /// Command a position.
    ///
    /// # Errors
    ///
    /// Returns the register failure, if any.
    #[inline]
    pub fn write_desired(
        &self,
        regs: &mut impl RegisterInterface,
        position: Position,
    ) -> RegisterResult {
        self.write(regs, RegisterOffset::Desired, position_to_word(position))
    }

    /// Read back the commanded position.
    ///
    /// # Errors
    ///
    /// Returns the register failure, if any.
    pub fn read_desired(&self, regs: &mut impl RegisterInterface) -> RegisterResult<Position> {
        self.read(regs, RegisterOffset::Desired).map(word_to_position)
    }

    /// Read the measured position.
    ///
    /// # Errors
    ///
    /// Returns the register failure, if any.
    #[inline]
    pub fn read_actual(&self, regs: &mut impl RegisterInterface) -> RegisterResult<Position> {
        self.read(regs, RegisterOffset::Actual).map(word_to_position)
    }

    /// Zero every register software owns (Kp/Ki, Kd, desired).
    ///
    /// # Errors
    ///
    /// Returns the first register failure.
    pub fn reset(&self, regs: &mut impl RegisterInterface) -> RegisterResult {
        for offset in RegisterOffset::ALL {
            if offset.is_reset_target() {
                self.write(regs, offset, 0)?;
            }
        }
        debug!(axis = %self.name, "registers reset");
        Ok(())
    }

    /// Raw word read by register number, bypassing the gain codec.
    ///
    /// # Errors
    ///
    /// Returns the register failure, if any.
    pub fn read_raw(&self, regs: &mut impl RegisterInterface, index: RegisterIndex) -> RegisterResult<u32> {
        self.read(regs, index.offset())
    }

    /// Raw word write by register number, bypassing the gain codec.
    ///
    /// # Errors
    ///
    /// Returns the register failure, if any.
    pub fn write_raw(
        &self,
        regs: &mut impl RegisterInterface,
        index: RegisterIndex,
        value: u32,
    ) -> RegisterResult {
        self.write(regs, index.offset(), value)
    }

    /// Snapshot of gains and positions as held by hardware.
    ///
    /// # Errors
    ///
    /// Returns the first register failure.
    pub fn status(&self, regs: &mut impl RegisterInterface) -> RegisterResult<AxisStatus> {
        Ok(AxisStatus {
            name: self.name.clone(),
            gains: self.read_gains(regs)?,
            desired: self.read_desired(regs)?,
            actual: self.read_actual(regs)?,
        })
    }
}

/// Register snapshot of one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisStatus {
    /// Axis name
    pub name: String,
    /// Decoded gains
    pub gains: GainSet,
    /// Commanded position
    pub desired: Position,
    /// Measured position
    pub actual: Position,
}

impl AxisStatus {
    /// Tracking error (`desired - actual`), widened so it cannot overflow.
    pub fn error(&self) -> i64 {
        i64::from(self.desired) - i64::from(self.actual)
    }
}

impl fmt::Display for AxisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} desired={} actual={} error={}",
            self.name,
            self.gains,
            self.desired,
            self.actual,
            self.error()
        )
    }
}
