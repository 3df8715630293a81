//! Error types for the clock crate.

/// Invalid timing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// The counter runs below 1 kHz, so a millisecond has no whole tick count
    #[error("Counter frequency {counter_hz} Hz is below 1 kHz")]
    CounterTooSlow {
        /// Configured counter frequency
        counter_hz: u64,
    },

    /// The command rate is zero
    #[error("Command frequency must be non-zero")]
    ZeroCommandRate,

    /// The command rate exceeds the counter frequency
    #[error("Command frequency {command_hz} Hz exceeds counter frequency {counter_hz} Hz")]
    CommandRateTooHigh {
        /// Configured counter frequency
        counter_hz: u64,
        /// Requested command frequency
        command_hz: u32,
    },
}

/// Result type for clock configuration.
pub type ClockResult<T> = Result<T, ClockError>;
