//! A single minimum-jerk move.

use serde::{Deserialize, Serialize};

use crate::quintic::position_at;

/// One move from `start` to `end` over `duration_ms`.
///
/// Segments are plain values; once a motion begins its segments are never
/// modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrajectorySegment {
    /// Position at the beginning of the move.
    pub start: i32,
    /// Position at the end of the move.
    pub end: i32,
    /// Length of the move in milliseconds.
    pub duration_ms: u64,
}

impl TrajectorySegment {
    /// Create a segment.
    pub const fn new(start: i32, end: i32, duration_ms: u64) -> Self {
        Self {
            start,
            end,
            duration_ms,
        }
    }

    /// A segment that stays at `position` for `duration_ms`.
    pub const fn hold(position: i32, duration_ms: u64) -> Self {
        Self::new(position, position, duration_ms)
    }

    /// The same move run backwards.
    pub const fn reversed(self) -> Self {
        Self::new(self.end, self.start, self.duration_ms)
    }

    /// Position `local_ms` after the segment began.
    #[inline]
    pub fn position_at(&self, local_ms: u64) -> i32 {
        position_at(local_ms, self.duration_ms, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_is_constant() {
        let seg = TrajectorySegment::hold(-42, 500);
        for t in [0, 1, 250, 499, 500, 10_000] {
            assert_eq!(seg.position_at(t), -42);
        }
    }

    #[test]
    fn test_reversed_swaps_endpoints() {
        let seg = TrajectorySegment::new(0, 1000, 1000).reversed();
        assert_eq!(seg.position_at(0), 1000);
        assert_eq!(seg.position_at(1000), 0);
    }
}
