//! Promotion of wrapping 32-bit counters to 64 bits.

use crate::source::TickSource;

/// A free-running 32-bit hardware counter that wraps to zero.
pub trait Counter32 {
    /// Current raw counter value.
    fn read(&mut self) -> u32;
}

impl<F: FnMut() -> u32> Counter32 for F {
    #[inline]
    fn read(&mut self) -> u32 {
        self()
    }
}

/// Extends a wrapping [`Counter32`] into a monotonic 64-bit [`TickSource`].
///
/// A raw value smaller than the previous one is taken as exactly one
/// wraparound. The counter must therefore be polled at least once per wrap
/// period (about 13 s for a 325 MHz counter), which a busy-polling loop
/// always does.
#[derive(Debug, Clone)]
pub struct WideningCounter<C> {
    counter: C,
    high: u64,
    last_raw: u32,
}

impl<C: Counter32> WideningCounter<C> {
    /// Wrap `counter`, taking its current value as the starting point.
    pub fn new(mut counter: C) -> Self {
        let last_raw = counter.read();
        Self {
            counter,
            high: 0,
            last_raw,
        }
    }

    /// Number of wraparounds observed so far.
    pub fn wraps(&self) -> u64 {
        self.high >> 32
    }
}

impl<C: Counter32> TickSource for WideningCounter<C> {
    fn now(&mut self) -> u64 {
        let raw = self.counter.read();
        if raw < self.last_raw {
            self.high = self.high.wrapping_add(1 << 32);
        }
        self.last_raw = raw;
        self.high | u64::from(raw)
    }
}
