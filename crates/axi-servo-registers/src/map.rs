//! Register offsets of the position-controller IP block.

use core::fmt;

use axi_servo_errors::ValidationError;

/// Number of 32-bit registers in one axis block.
pub const REGISTER_COUNT: u8 = 4;

/// Width of one register in bytes.
const REGISTER_STRIDE: u32 = 4;

/// Named register offsets inside an axis block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RegisterOffset {
    /// Packed Kp (bits 14:0) and Ki (bits 30:16)
    KpKi = 0x00,
    /// Kd (bits 14:0)
    Kd = 0x04,
    /// Measured position, owned by hardware
    Actual = 0x08,
    /// Commanded position
    Desired = 0x0C,
}

impl RegisterOffset {
    /// All registers in address order.
    pub const ALL: [RegisterOffset; 4] = [
        RegisterOffset::KpKi,
        RegisterOffset::Kd,
        RegisterOffset::Actual,
        RegisterOffset::Desired,
    ];

    /// Byte offset from the block base address.
    #[inline]
    pub const fn bytes(self) -> u32 {
        self as u32
    }

    /// Registers cleared by a reset. Actual position belongs to hardware.
    pub const fn is_reset_target(self) -> bool {
        !matches!(self, RegisterOffset::Actual)
    }
}

impl fmt::Display for RegisterOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegisterOffset::KpKi => "KPKI",
            RegisterOffset::Kd => "KD",
            RegisterOffset::Actual => "ACTUAL",
            RegisterOffset::Desired => "DESIRED",
        };
        write!(f, "{name}@{:#04x}", self.bytes())
    }
}

/// Register number as typed by an operator (0 to 3).
///
/// Raw access by index bypasses the gain codec, so a write through index 0
/// stores the word exactly as given.
///
/// # Examples
///
/// ```
/// use axi_servo_registers::{RegisterIndex, RegisterOffset};
///
/// let idx = RegisterIndex::new(3)?;
/// assert_eq!(idx.offset(), RegisterOffset::Desired);
/// assert!(RegisterIndex::new(4).is_err());
/// # Ok::<(), axi_servo_errors::ValidationError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterIndex(u8);

impl RegisterIndex {
    /// Validate a register number.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::OutOfRange` for indices above 3.
    pub fn new(index: u8) -> Result<Self, ValidationError> {
        if index >= REGISTER_COUNT {
            return Err(ValidationError::out_of_range(
                "register index",
                index,
                0,
                REGISTER_COUNT - 1,
            ));
        }
        Ok(Self(index))
    }

    /// The register number.
    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// The named register at this index.
    pub fn offset(self) -> RegisterOffset {
        match self.0 {
            0 => RegisterOffset::KpKi,
            1 => RegisterOffset::Kd,
            2 => RegisterOffset::Actual,
            _ => RegisterOffset::Desired,
        }
    }
}

impl TryFrom<u8> for RegisterIndex {
    type Error = ValidationError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl From<RegisterOffset> for RegisterIndex {
    fn from(offset: RegisterOffset) -> Self {
        Self((offset.bytes() / REGISTER_STRIDE) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_match_hardware_map() {
        assert_eq!(RegisterOffset::KpKi.bytes(), 0x00);
        assert_eq!(RegisterOffset::Kd.bytes(), 0x04);
        assert_eq!(RegisterOffset::Actual.bytes(), 0x08);
        assert_eq!(RegisterOffset::Desired.bytes(), 0x0C);
    }

    #[test]
    fn test_index_offset_round_trip() -> Result<(), ValidationError> {
        for offset in RegisterOffset::ALL {
            let idx = RegisterIndex::from(offset);
            assert_eq!(RegisterIndex::new(idx.get())?.offset(), offset);
            assert_eq!(u32::from(idx.get()) * REGISTER_STRIDE, offset.bytes());
        }
        Ok(())
    }

    #[test]
    fn test_index_rejects_out_of_range() {
        let err = RegisterIndex::try_from(9);
        assert!(matches!(err, Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn test_actual_is_not_reset() {
        let targets: Vec<_> = RegisterOffset::ALL
            .into_iter()
            .filter(|r| r.is_reset_target())
            .collect();
        assert_eq!(
            targets,
            vec![
                RegisterOffset::KpKi,
                RegisterOffset::Kd,
                RegisterOffset::Desired
            ]
        );
    }
}
