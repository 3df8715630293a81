//! Command-rate gating.

use crate::error::{ClockError, ClockResult};

/// Lets a busy-polling loop issue commands at a fixed period.
///
/// The gate remembers the tick of the last issued command. A new command is
/// allowed once at least `period_ticks` have passed, so two commands are never
/// closer than one period no matter how fast the loop polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandGate {
    period_ticks: u64,
    last: u64,
}

impl CommandGate {
    /// Gate with an explicit period. A zero period is raised to one tick.
    pub fn new(period_ticks: u64) -> Self {
        Self {
            period_ticks: period_ticks.max(1),
            last: 0,
        }
    }

    /// Gate whose period is `counter_hz / command_hz` ticks.
    ///
    /// # Errors
    ///
    /// Returns `ZeroCommandRate` for a zero command rate and
    /// `CommandRateTooHigh` when the period would be shorter than one tick.
    pub fn from_rates(counter_hz: u64, command_hz: u32) -> ClockResult<Self> {
        if command_hz == 0 {
            return Err(ClockError::ZeroCommandRate);
        }
        let period_ticks = counter_hz / u64::from(command_hz);
        if period_ticks == 0 {
            return Err(ClockError::CommandRateTooHigh {
                counter_hz,
                command_hz,
            });
        }
        Ok(Self::new(period_ticks))
    }

    /// Start timing from `now`; the first command is due one period later.
    #[inline]
    pub fn arm(&mut self, now: u64) {
        self.last = now;
    }

    /// Whether a command may be issued at `now`.
    #[inline]
    pub fn ready(&self, now: u64) -> bool {
        now.saturating_sub(self.last) >= self.period_ticks
    }

    /// Record a command issued at `now` and return the ticks since the
    /// previous one.
    #[inline]
    pub fn mark(&mut self, now: u64) -> u64 {
        let interval = now.saturating_sub(self.last);
        self.last = now;
        interval
    }

    /// Command period in ticks.
    pub fn period_ticks(&self) -> u64 {
        self.period_ticks
    }

    /// Tick of the last command, or of arming.
    pub fn last_command(&self) -> u64 {
        self.last
    }
}
