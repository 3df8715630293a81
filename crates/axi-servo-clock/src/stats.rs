//! Command timing statistics.

use serde::{Deserialize, Serialize};

/// Intervals between issued commands over one motion.
///
/// A command is counted late when its interval reaches two periods, meaning
/// at least one command slot was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommandTimingStats {
    /// Commands issued
    pub commands: u64,
    /// Commands issued two or more periods after the previous one
    pub late_commands: u64,
    /// Shortest observed interval in ticks, zero before the first command
    pub min_interval_ticks: u64,
    /// Longest observed interval in ticks
    pub max_interval_ticks: u64,
}

impl CommandTimingStats {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one command issued `interval_ticks` after the previous one.
    pub fn record(&mut self, interval_ticks: u64, period_ticks: u64) {
        self.min_interval_ticks = if self.commands == 0 {
            interval_ticks
        } else {
            self.min_interval_ticks.min(interval_ticks)
        };
        self.max_interval_ticks = self.max_interval_ticks.max(interval_ticks);
        self.commands = self.commands.saturating_add(1);
        if interval_ticks >= period_ticks.saturating_mul(2) {
            self.late_commands = self.late_commands.saturating_add(1);
        }
    }

    /// Fraction of commands that were late (0.0 to 1.0).
    pub fn late_rate(&self) -> f64 {
        if self.commands == 0 {
            0.0
        } else {
            self.late_commands as f64 / self.commands as f64
        }
    }

    /// Reset all statistics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
