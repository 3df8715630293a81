//! Error types for trajectory construction.

/// Error type for building motion profiles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrajectoryError {
    /// A profile needs at least one segment.
    #[error("Motion profile has no segments")]
    EmptyProfile,

    /// The summed segment durations do not fit in 64 bits of milliseconds.
    #[error("Motion profile duration overflows at segment {segment}")]
    DurationOverflow {
        /// Index of the segment whose duration overflowed the total.
        segment: usize,
    },
}
