//! Multi-segment motion profiles.

use serde::{Deserialize, Serialize};

use crate::error::TrajectoryError;
use crate::segment::TrajectorySegment;

/// An ordered sequence of segments executed back to back on one axis.
///
/// Time is measured from the start of the first segment. An instant that
/// falls exactly on a boundary belongs to the earlier segment, so the
/// forward move of a forward-and-return profile owns `t = phase`. Past the
/// total duration the final segment's end position is held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<TrajectorySegment>",
    into = "Vec<TrajectorySegment>"
)]
pub struct MotionProfile {
    segments: Vec<TrajectorySegment>,
    total_ms: u64,
}

impl MotionProfile {
    /// Build a profile from segments in execution order.
    ///
    /// # Errors
    ///
    /// Returns `EmptyProfile` for an empty list and `DurationOverflow` when
    /// the durations do not sum into a `u64`.
    pub fn new(segments: Vec<TrajectorySegment>) -> Result<Self, TrajectoryError> {
        if segments.is_empty() {
            return Err(TrajectoryError::EmptyProfile);
        }
        let mut total_ms: u64 = 0;
        for (segment, seg) in segments.iter().enumerate() {
            total_ms = total_ms
                .checked_add(seg.duration_ms)
                .ok_or(TrajectoryError::DurationOverflow { segment })?;
        }
        Ok(Self { segments, total_ms })
    }

    /// Move from `q0` to `qf` in `phase_ms`, then back to `q0` in `phase_ms`.
    pub fn forward_and_return(q0: i32, qf: i32, phase_ms: u64) -> Self {
        let forward = TrajectorySegment::new(q0, qf, phase_ms);
        Self {
            segments: vec![forward, forward.reversed()],
            total_ms: phase_ms.saturating_mul(2),
        }
    }

    /// Stay at `position` for `duration_ms`.
    pub fn hold(position: i32, duration_ms: u64) -> Self {
        Self {
            segments: vec![TrajectorySegment::hold(position, duration_ms)],
            total_ms: duration_ms,
        }
    }

    /// The segments in execution order.
    pub fn segments(&self) -> &[TrajectorySegment] {
        &self.segments
    }

    /// Sum of all segment durations.
    #[inline]
    pub fn total_duration_ms(&self) -> u64 {
        self.total_ms
    }

    /// Position at `elapsed_ms` after the profile started.
    pub fn position_at(&self, elapsed_ms: u64) -> i32 {
        let mut segment_start: u64 = 0;
        let mut last = None;
        for seg in &self.segments {
            let segment_end = segment_start.saturating_add(seg.duration_ms);
            if elapsed_ms <= segment_end {
                return seg.position_at(elapsed_ms.saturating_sub(segment_start));
            }
            segment_start = segment_end;
            last = Some(seg);
        }
        last.map_or(0, |seg| seg.end)
    }
}

impl TryFrom<Vec<TrajectorySegment>> for MotionProfile {
    type Error = TrajectoryError;

    fn try_from(segments: Vec<TrajectorySegment>) -> Result<Self, Self::Error> {
        Self::new(segments)
    }
}

impl From<MotionProfile> for Vec<TrajectorySegment> {
    fn from(profile: MotionProfile) -> Self {
        profile.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_rejected() {
        assert_eq!(
            MotionProfile::new(Vec::new()),
            Err(TrajectoryError::EmptyProfile)
        );
    }

    #[test]
    fn test_duration_overflow_rejected() {
        let segs = vec![
            TrajectorySegment::hold(0, u64::MAX),
            TrajectorySegment::hold(0, 1),
        ];
        assert_eq!(
            MotionProfile::new(segs),
            Err(TrajectoryError::DurationOverflow { segment: 1 })
        );
    }

    #[test]
    fn test_forward_and_return_reference_motion() {
        let profile = MotionProfile::forward_and_return(0, 1000, 1000);
        assert_eq!(profile.position_at(0), 0);
        assert_eq!(profile.position_at(1000), 1000);
        assert_eq!(profile.position_at(1001), 1000);
        assert_eq!(profile.position_at(2000), 0);
        assert_eq!(profile.position_at(2500), 0);
    }

    #[test]
    fn test_boundary_belongs_to_earlier_segment() -> Result<(), TrajectoryError> {
        // a jump at the boundary makes ownership observable
        let profile = MotionProfile::new(vec![
            TrajectorySegment::hold(10, 100),
            TrajectorySegment::hold(20, 100),
        ])?;
        assert_eq!(profile.position_at(100), 10);
        assert_eq!(profile.position_at(101), 20);
        assert_eq!(profile.position_at(5000), 20);
        Ok(())
    }

    #[test]
    fn test_matches_two_phase_rule() {
        let profile = MotionProfile::forward_and_return(-300, 700, 400);
        for t in 0..=800 {
            let expected = if t <= 400 {
                crate::position_at(t, 400, -300, 700)
            } else {
                crate::position_at(t - 400, 400, 700, -300)
            };
            assert_eq!(profile.position_at(t), expected, "t={t}");
        }
    }
}
