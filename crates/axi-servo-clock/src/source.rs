//! Tick sources.

use std::time::Instant;

/// A monotonic free-running counter.
///
/// `now` must never go backwards. Implementations backed by a narrow hardware
/// counter should be wrapped in a [`WideningCounter`](crate::WideningCounter).
pub trait TickSource {
    /// Current counter value.
    fn now(&mut self) -> u64;
}

impl<T: TickSource + ?Sized> TickSource for &mut T {
    #[inline]
    fn now(&mut self) -> u64 {
        (**self).now()
    }
}

impl<T: TickSource + ?Sized> TickSource for Box<T> {
    #[inline]
    fn now(&mut self) -> u64 {
        (**self).now()
    }
}

/// Host monotonic clock counting nanoseconds since construction.
#[derive(Debug, Clone, Copy)]
pub struct HostTickSource {
    origin: Instant,
}

impl HostTickSource {
    /// Tick frequency of the host source.
    pub const FREQUENCY_HZ: u64 = 1_000_000_000;

    /// Start counting from now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for HostTickSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for HostTickSource {
    fn now(&mut self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_source_is_monotonic() {
        let mut source = HostTickSource::new();
        let a = source.now();
        let b = source.now();
        assert!(b >= a);
    }
}
