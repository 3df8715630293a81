//! Conversion from counter ticks to milliseconds.

use crate::MS_PER_SECOND;
use crate::error::{ClockError, ClockResult};
use crate::source::TickSource;

/// A tick source paired with its frequency.
///
/// Millisecond conversion truncates, so `to_ms(ticks_per_ms() - 1) == 0`.
#[derive(Debug)]
pub struct SampleClock<S> {
    source: S,
    counter_hz: u64,
    ticks_per_ms: u64,
}

impl<S: TickSource> SampleClock<S> {
    /// Pair `source` with its counter frequency.
    ///
    /// # Errors
    ///
    /// Returns `CounterTooSlow` if `counter_hz` is below 1 kHz.
    pub fn new(source: S, counter_hz: u64) -> ClockResult<Self> {
        let ticks_per_ms = counter_hz / MS_PER_SECOND;
        if ticks_per_ms == 0 {
            return Err(ClockError::CounterTooSlow { counter_hz });
        }
        Ok(Self {
            source,
            counter_hz,
            ticks_per_ms,
        })
    }

    /// Read the counter.
    #[inline]
    pub fn now(&mut self) -> u64 {
        self.source.now()
    }

    /// Whole milliseconds in `ticks`.
    #[inline]
    pub fn to_ms(&self, ticks: u64) -> u64 {
        ticks / self.ticks_per_ms
    }

    /// Whole milliseconds from `start` to `now`; zero if `now` precedes `start`.
    #[inline]
    pub fn elapsed_ms(&self, start: u64, now: u64) -> u64 {
        self.to_ms(now.saturating_sub(start))
    }

    /// Counter ticks per millisecond.
    pub fn ticks_per_ms(&self) -> u64 {
        self.ticks_per_ms
    }

    /// Counter frequency in Hz.
    pub fn counter_hz(&self) -> u64 {
        self.counter_hz
    }

    /// Mutable access to the underlying source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Release the underlying source.
    pub fn into_source(self) -> S {
        self.source
    }
}
