//! In-memory register file.

use std::collections::BTreeMap;

use axi_servo_errors::{RegisterError, RegisterResult};
use tracing::trace;

use crate::interface::RegisterInterface;
use crate::map::{REGISTER_COUNT, RegisterOffset};

/// A register file holding one four-word block per mapped base address.
///
/// Accesses to an unmapped base fail with `Unresponsive`; offsets that are not
/// word aligned or fall past the last register fail with `Misaligned`. The
/// actual-position register is plain storage here, so hosts can drive it with
/// [`MemoryRegisterBank::set_actual`] to emulate a plant.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegisterBank {
    blocks: BTreeMap<u32, [u32; REGISTER_COUNT as usize]>,
}

impl MemoryRegisterBank {
    /// Create an empty bank with no mapped blocks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bank with a zeroed block at each of `bases`.
    pub fn with_blocks(bases: impl IntoIterator<Item = u32>) -> Self {
        let mut bank = Self::new();
        for base in bases {
            bank.map_block(base);
        }
        bank
    }

    /// Map a zeroed block at `base`. Existing contents are kept.
    pub fn map_block(&mut self, base: u32) {
        self.blocks.entry(base).or_default();
    }

    /// Whether a block is mapped at `base`.
    pub fn is_mapped(&self, base: u32) -> bool {
        self.blocks.contains_key(&base)
    }

    /// Overwrite the actual-position register of a block.
    ///
    /// # Errors
    ///
    /// Returns `Unresponsive` if no block is mapped at `base`.
    pub fn set_actual(&mut self, base: u32, position: i32) -> RegisterResult {
        let slot = self.slot_mut(base, RegisterOffset::Actual.bytes())?;
        *slot = position.cast_unsigned();
        Ok(())
    }

    /// Current value of a register without going through the trait.
    pub fn peek(&self, base: u32, offset: RegisterOffset) -> Option<u32> {
        let index = word_index(offset.bytes())?;
        self.blocks.get(&base)?.get(index).copied()
    }

    fn slot_mut(&mut self, base: u32, offset: u32) -> RegisterResult<&mut u32> {
        let index = word_index(offset).ok_or(RegisterError::Misaligned { base, offset })?;
        self.blocks
            .get_mut(&base)
            .ok_or(RegisterError::Unresponsive { base })?
            .get_mut(index)
            .ok_or(RegisterError::Misaligned { base, offset })
    }
}

fn word_index(offset: u32) -> Option<usize> {
    if !offset.is_multiple_of(4) {
        return None;
    }
    let index = usize::try_from(offset / 4).ok()?;
    (index < usize::from(REGISTER_COUNT)).then_some(index)
}

impl RegisterInterface for MemoryRegisterBank {
    fn write32(&mut self, base: u32, offset: u32, value: u32) -> RegisterResult {
        trace!(base = format_args!("{base:#010x}"), offset, value, "write32");
        *self.slot_mut(base, offset)? = value;
        Ok(())
    }

    fn read32(&mut self, base: u32, offset: u32) -> RegisterResult<u32> {
        let value = *self.slot_mut(base, offset)?;
        trace!(base = format_args!("{base:#010x}"), offset, value, "read32");
        Ok(value)
    }
}
