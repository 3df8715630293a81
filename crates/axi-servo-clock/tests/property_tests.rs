//! Property-based tests for clock and gate behaviour.

use axi_servo_clock::{CommandGate, CommandTimingStats, SampleClock, TickSource, WideningCounter};
use proptest::prelude::*;
use quickcheck_macros::quickcheck;

struct Fixed(u64);

impl TickSource for Fixed {
    fn now(&mut self) -> u64 {
        self.0
    }
}

#[quickcheck]
fn prop_to_ms_is_monotonic(a: u64, b: u64, hz: u32) -> bool {
    let hz = u64::from(hz).max(1_000);
    let Ok(clock) = SampleClock::new(Fixed(0), hz) else {
        return false;
    };
    let (lo, hi) = (a.min(b), a.max(b));
    clock.to_ms(lo) <= clock.to_ms(hi)
}

#[quickcheck]
fn prop_to_ms_matches_whole_milliseconds(ms: u32, extra: u16) -> bool {
    let Ok(clock) = SampleClock::new(Fixed(0), 1_000_000) else {
        return false;
    };
    let extra = u64::from(extra) % 1_000;
    clock.to_ms(u64::from(ms) * 1_000 + extra) == u64::from(ms)
}

proptest! {
    #[test]
    fn prop_gate_never_fires_twice_within_a_period(
        period in 1u64..1_000,
        steps in proptest::collection::vec(0u64..500, 1..500),
    ) {
        let mut gate = CommandGate::new(period);
        let mut now = 0u64;
        gate.arm(now);
        let mut last_fire: Option<u64> = None;
        for step in steps {
            now += step;
            if gate.ready(now) {
                if let Some(prev) = last_fire {
                    prop_assert!(now - prev >= period);
                }
                gate.mark(now);
                last_fire = Some(now);
            }
        }
    }

    #[test]
    fn prop_gate_fires_every_period_under_fast_polling(period in 1u64..200, periods in 1u64..100) {
        let mut gate = CommandGate::new(period);
        gate.arm(0);
        let mut fired = 0u64;
        for now in 1..=period * periods {
            if gate.ready(now) {
                gate.mark(now);
                fired += 1;
            }
        }
        prop_assert_eq!(fired, periods);
    }

    #[test]
    fn prop_widening_counter_is_monotonic(
        start in any::<u32>(),
        steps in proptest::collection::vec(0u32..u32::MAX / 2, 1..200),
    ) {
        let mut raw = start;
        let mut script = Vec::with_capacity(steps.len() + 1);
        script.push(raw);
        for step in &steps {
            raw = raw.wrapping_add(*step);
            script.push(raw);
        }
        let mut iter = script.into_iter();
        let mut counter = WideningCounter::new(move || iter.next().unwrap_or(0));
        let mut prev = u64::from(start);
        for step in steps {
            let now = counter.now();
            prop_assert_eq!(now - prev, u64::from(step));
            prev = now;
        }
    }

    #[test]
    fn prop_stats_min_le_max(intervals in proptest::collection::vec(1u64..10_000, 1..100)) {
        let mut stats = CommandTimingStats::new();
        for i in &intervals {
            stats.record(*i, 100);
        }
        prop_assert!(stats.min_interval_ticks <= stats.max_interval_ticks);
        prop_assert_eq!(stats.commands, intervals.len() as u64);
        prop_assert!(stats.late_commands <= stats.commands);
    }
}
