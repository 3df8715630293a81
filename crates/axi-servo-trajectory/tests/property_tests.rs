//! Property-based tests for trajectory evaluation.

use axi_servo_trajectory::{MotionProfile, TrajectorySegment, blend, position_at};
use proptest::prelude::*;
use quickcheck_macros::quickcheck;

fn sanitize(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.5 }
}

#[quickcheck]
fn prop_blend_stays_in_unit_range(tau: f64) -> bool {
    let b = blend(sanitize(tau));
    (0.0..=1.0).contains(&b)
}

#[quickcheck]
fn prop_segment_starts_at_start(start: i32, end: i32, phase: u16) -> bool {
    phase == 0 || position_at(0, u64::from(phase), start, end) == start
}

#[quickcheck]
fn prop_segment_ends_at_end(start: i32, end: i32, phase: u16, extra: u16) -> bool {
    let phase = u64::from(phase);
    position_at(phase + u64::from(extra), phase, start, end) == end
}

proptest! {
    #[test]
    fn prop_rising_segment_is_monotonic(
        start in -1_000_000i32..1_000_000,
        rise in 0i32..1_000_000,
        phase in 1u64..5_000,
    ) {
        let end = start + rise;
        let mut prev = position_at(0, phase, start, end);
        for t in 1..=phase {
            let p = position_at(t, phase, start, end);
            prop_assert!(p >= prev, "t={} p={} prev={}", t, p, prev);
            prev = p;
        }
    }

    #[test]
    fn prop_falling_segment_is_monotonic(
        start in -1_000_000i32..1_000_000,
        fall in 0i32..1_000_000,
        phase in 1u64..5_000,
    ) {
        let end = start - fall;
        let mut prev = position_at(0, phase, start, end);
        for t in 1..=phase {
            let p = position_at(t, phase, start, end);
            prop_assert!(p <= prev, "t={} p={} prev={}", t, p, prev);
            prev = p;
        }
    }

    #[test]
    fn prop_position_between_endpoints(
        start in any::<i32>(),
        end in any::<i32>(),
        t in 0u64..10_000,
        phase in 0u64..10_000,
    ) {
        let p = position_at(t, phase, start, end);
        prop_assert!(p >= start.min(end) && p <= start.max(end));
    }

    #[test]
    fn prop_forward_and_return_visits_endpoints(
        q0 in -100_000i32..100_000,
        qf in -100_000i32..100_000,
        phase in 0u64..100_000,
    ) {
        let profile = MotionProfile::forward_and_return(q0, qf, phase);
        prop_assert_eq!(profile.total_duration_ms(), 2 * phase);
        prop_assert_eq!(profile.position_at(phase), qf);
        prop_assert_eq!(profile.position_at(2 * phase), q0);
        prop_assert_eq!(profile.position_at(2 * phase + 1), q0);
        if phase > 0 {
            prop_assert_eq!(profile.position_at(0), q0);
        }
    }

    #[test]
    fn prop_profile_is_continuous_across_boundaries(
        a in -10_000i32..10_000,
        b in -10_000i32..10_000,
        c in -10_000i32..10_000,
        d1 in 1u64..2_000,
        d2 in 1u64..2_000,
    ) {
        let profile = MotionProfile::new(vec![
            TrajectorySegment::new(a, b, d1),
            TrajectorySegment::new(b, c, d2),
        ]).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(profile.position_at(d1), b);
        prop_assert_eq!(profile.position_at(d1 + 1), position_at(1, d2, b, c));
        prop_assert_eq!(profile.position_at(d1 + d2), c);
    }
}
