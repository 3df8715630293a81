//! The register transport seam.

use axi_servo_errors::RegisterResult;

/// Word-level access to memory-mapped register blocks.
///
/// Implementations move 32-bit values between software and a register block
/// identified by its base address. Each call is a single transaction and is
/// never retried by callers; a failure is reported as a
/// [`RegisterError`](axi_servo_errors::RegisterError).
///
/// The trait takes `&mut self` because bus handles are usually exclusive and
/// may carry transaction state.
pub trait RegisterInterface {
    /// Write one 32-bit word to `base + offset`.
    ///
    /// # Errors
    ///
    /// Returns a `RegisterError` if the bus does not accept the write.
    fn write32(&mut self, base: u32, offset: u32, value: u32) -> RegisterResult;

    /// Read one 32-bit word from `base + offset`.
    ///
    /// # Errors
    ///
    /// Returns a `RegisterError` if the read does not complete.
    fn read32(&mut self, base: u32, offset: u32) -> RegisterResult<u32>;
}

impl<R: RegisterInterface + ?Sized> RegisterInterface for &mut R {
    #[inline]
    fn write32(&mut self, base: u32, offset: u32, value: u32) -> RegisterResult {
        (**self).write32(base, offset, value)
    }

    #[inline]
    fn read32(&mut self, base: u32, offset: u32) -> RegisterResult<u32> {
        (**self).read32(base, offset)
    }
}

impl<R: RegisterInterface + ?Sized> RegisterInterface for Box<R> {
    #[inline]
    fn write32(&mut self, base: u32, offset: u32, value: u32) -> RegisterResult {
        (**self).write32(base, offset, value)
    }

    #[inline]
    fn read32(&mut self, base: u32, offset: u32) -> RegisterResult<u32> {
        (**self).read32(base, offset)
    }
}
