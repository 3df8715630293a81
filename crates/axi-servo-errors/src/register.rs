//! Register bus error types.
//!
//! These errors are raised from inside the control loop, so they follow the
//! RT-path rules:
//! - `Copy` semantics (no heap allocations)
//! - Fixed numeric codes for compact reporting

use crate::common::ErrorSeverity;

/// Failure talking to a memory-mapped register block.
///
/// Every variant is fatal to the motion in progress: the control loop stops
/// issuing commands as soon as one is observed and never retries.
///
/// # Examples
///
/// ```
/// use axi_servo_errors::{ErrorSeverity, RegisterError};
///
/// let err = RegisterError::WriteFailed { base: 0x43C0_0000, offset: 0x0C };
/// assert_eq!(err.code(), 1);
/// assert_eq!(err.severity(), ErrorSeverity::Critical);
/// assert_eq!(err.base(), 0x43C0_0000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum RegisterError {
    /// A 32-bit write was not accepted by the bus
    #[error("Register write failed at {base:#010x}+{offset:#04x}")]
    WriteFailed {
        /// Base address of the register block
        base: u32,
        /// Byte offset inside the block
        offset: u32,
    },

    /// A 32-bit read did not complete
    #[error("Register read failed at {base:#010x}+{offset:#04x}")]
    ReadFailed {
        /// Base address of the register block
        base: u32,
        /// Byte offset inside the block
        offset: u32,
    },

    /// The register block stopped responding altogether
    #[error("Register block at {base:#010x} is unresponsive")]
    Unresponsive {
        /// Base address of the register block
        base: u32,
    },

    /// The offset is not 32-bit aligned or lies outside the block
    #[error("Misaligned register offset {offset:#04x} at {base:#010x}")]
    Misaligned {
        /// Base address of the register block
        base: u32,
        /// Rejected byte offset
        offset: u32,
    },
}

impl RegisterError {
    /// Get the numeric error code.
    pub fn code(self) -> u8 {
        match self {
            RegisterError::WriteFailed { .. } => 1,
            RegisterError::ReadFailed { .. } => 2,
            RegisterError::Unresponsive { .. } => 3,
            RegisterError::Misaligned { .. } => 4,
        }
    }

    /// Base address of the block that failed.
    pub fn base(self) -> u32 {
        match self {
            RegisterError::WriteFailed { base, .. }
            | RegisterError::ReadFailed { base, .. }
            | RegisterError::Unresponsive { base }
            | RegisterError::Misaligned { base, .. } => base,
        }
    }

    /// Get the error severity.
    pub fn severity(self) -> ErrorSeverity {
        match self {
            RegisterError::Misaligned { .. } => ErrorSeverity::Error,
            _ => ErrorSeverity::Critical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_error_codes() {
        assert_eq!(RegisterError::WriteFailed { base: 0, offset: 0 }.code(), 1);
        assert_eq!(RegisterError::ReadFailed { base: 0, offset: 0 }.code(), 2);
        assert_eq!(RegisterError::Unresponsive { base: 0 }.code(), 3);
        assert_eq!(RegisterError::Misaligned { base: 0, offset: 3 }.code(), 4);
    }

    #[test]
    fn test_register_error_display() {
        let err = RegisterError::ReadFailed {
            base: 0x43C0_0000,
            offset: 0x08,
        };
        assert_eq!(err.to_string(), "Register read failed at 0x43c00000+0x08");
    }

    #[test]
    fn test_register_error_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<RegisterError>();
    }
}
