//! Deterministic tick sources.
//!
//! The control loop busy-polls its tick source, so every source here keeps
//! advancing; a source that stood still would spin a motion forever.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use axi_servo_clock::TickSource;

/// Advances by a fixed step on every read, starting at `start`.
#[derive(Debug, Clone)]
pub struct SteppingTicks {
    next: u64,
    step: u64,
    reads: u64,
}

impl SteppingTicks {
    /// First read returns `start`, each later read `step` more. A zero step is
    /// raised to 1.
    pub fn new(start: u64, step: u64) -> Self {
        Self {
            next: start,
            step: step.max(1),
            reads: 0,
        }
    }

    /// Number of reads so far.
    pub fn reads(&self) -> u64 {
        self.reads
    }
}

impl TickSource for SteppingTicks {
    fn now(&mut self) -> u64 {
        let now = self.next;
        self.next = self.next.saturating_add(self.step);
        self.reads += 1;
        now
    }
}

/// Replays a fixed list of tick values, then keeps stepping from the last.
#[derive(Debug, Clone)]
pub struct ScriptedTicks {
    script: VecDeque<u64>,
    last: u64,
    fallback_step: u64,
}

impl ScriptedTicks {
    /// Replay `script`, then continue in steps of `fallback_step` (min 1).
    pub fn new(script: impl IntoIterator<Item = u64>, fallback_step: u64) -> Self {
        Self {
            script: script.into_iter().collect(),
            last: 0,
            fallback_step: fallback_step.max(1),
        }
    }

    /// Values not replayed yet.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl TickSource for ScriptedTicks {
    fn now(&mut self) -> u64 {
        self.last = match self.script.pop_front() {
            Some(v) => v,
            None => self.last.saturating_add(self.fallback_step),
        };
        self.last
    }
}

/// A stepping source whose current value can be observed from elsewhere.
///
/// Clone a [`TickProbe`] into a mock so it can stamp events with the tick
/// the loop last saw.
#[derive(Debug, Clone)]
pub struct SharedTicks {
    cell: Rc<Cell<u64>>,
    step: u64,
}

/// Read-only view of a [`SharedTicks`] counter.
#[derive(Debug, Clone)]
pub struct TickProbe {
    cell: Rc<Cell<u64>>,
}

impl TickProbe {
    /// Tick most recently returned by the source.
    pub fn current(&self) -> u64 {
        self.cell.get()
    }
}

impl SharedTicks {
    /// Source advancing by `step` (min 1) per read; the first read returns
    /// `start + step`.
    pub fn new(start: u64, step: u64) -> Self {
        Self {
            cell: Rc::new(Cell::new(start)),
            step: step.max(1),
        }
    }

    /// A probe observing this source.
    pub fn probe(&self) -> TickProbe {
        TickProbe {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl TickSource for SharedTicks {
    fn now(&mut self) -> u64 {
        let now = self.cell.get().saturating_add(self.step);
        self.cell.set(now);
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepping() {
        let mut ticks = SteppingTicks::new(5, 3);
        assert_eq!(ticks.now(), 5);
        assert_eq!(ticks.now(), 8);
        assert_eq!(ticks.reads(), 2);
    }

    #[test]
    fn test_scripted_then_fallback() {
        let mut ticks = ScriptedTicks::new([0, 10, 10, 30], 7);
        let seen: Vec<u64> = (0..6).map(|_| ticks.now()).collect();
        assert_eq!(seen, vec![0, 10, 10, 30, 37, 44]);
    }

    #[test]
    fn test_shared_probe_follows_source() {
        let mut ticks = SharedTicks::new(0, 2);
        let probe = ticks.probe();
        assert_eq!(ticks.now(), 2);
        assert_eq!(probe.current(), 2);
    }
}
