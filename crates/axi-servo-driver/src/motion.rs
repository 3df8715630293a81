//! Motion lifecycle and reporting.

use core::fmt;

use axi_servo_clock::CommandTimingStats;
use axi_servo_errors::{RegisterError, StorageError};

/// Why a motion stopped before its planned end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartialReason {
    /// A register access failed; no further commands were issued
    RegisterFault(RegisterError),
    /// The caller requested cancellation
    Cancelled,
}

/// How a motion ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionOutcome {
    /// Ran until the elapsed time passed the planned duration
    Complete,
    /// Stopped early
    Partial(PartialReason),
}

impl MotionOutcome {
    /// Whether the motion ran to its planned end.
    pub fn is_complete(&self) -> bool {
        matches!(self, MotionOutcome::Complete)
    }

    /// The register fault that ended the motion, if any.
    pub fn register_fault(&self) -> Option<RegisterError> {
        match self {
            MotionOutcome::Partial(PartialReason::RegisterFault(e)) => Some(*e),
            _ => None,
        }
    }
}

impl fmt::Display for MotionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionOutcome::Complete => write!(f, "complete"),
            MotionOutcome::Partial(PartialReason::Cancelled) => write!(f, "cancelled"),
            MotionOutcome::Partial(PartialReason::RegisterFault(e)) => {
                write!(f, "stopped: {e}")
            }
        }
    }
}

/// Driver state. A motion moves `Idle -> Running -> Done`; the next motion
/// starts from `Done` the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionState {
    /// No motion has run yet
    #[default]
    Idle,
    /// A motion is in progress
    Running,
    /// The last motion ended this way
    Done(MotionOutcome),
}

/// What kind of motion to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    /// Forward-and-return quintic trajectory; desired is written every command
    Trajectory,
    /// Desired written once up front; every command only samples
    StepCapture,
}

/// Summary of one motion.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionReport {
    /// Kind of motion that ran
    pub kind: MotionKind,
    /// How the motion ended
    pub outcome: MotionOutcome,
    /// Planned duration (ms)
    pub planned_ms: u64,
    /// Elapsed time at the last observation of the loop (ms)
    pub elapsed_ms: u64,
    /// Complete commands issued and sampled
    pub samples: u64,
    /// Log file the samples went to, if logging was on
    pub log_file: Option<String>,
    /// First storage failure seen during the motion; logging stopped there
    pub storage_error: Option<StorageError>,
    /// Command interval statistics
    pub timing: CommandTimingStats,
}

impl MotionReport {
    pub(crate) fn new(kind: MotionKind, planned_ms: u64) -> Self {
        Self {
            kind,
            outcome: MotionOutcome::Complete,
            planned_ms,
            elapsed_ms: 0,
            samples: 0,
            log_file: None,
            storage_error: None,
            timing: CommandTimingStats::new(),
        }
    }

    pub(crate) fn note_storage_error(&mut self, error: StorageError) {
        if self.storage_error.is_none() {
            self.storage_error = Some(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(MotionOutcome::Complete.to_string(), "complete");
        let fault = MotionOutcome::Partial(PartialReason::RegisterFault(
            RegisterError::ReadFailed {
                base: 0x43C0_0000,
                offset: 0x08,
            },
        ));
        assert_eq!(
            fault.to_string(),
            "stopped: Register read failed at 0x43c00000+0x08"
        );
        assert!(fault.register_fault().is_some());
        assert!(!fault.is_complete());
    }

    #[test]
    fn test_first_storage_error_kept() {
        let mut report = MotionReport::new(MotionKind::Trajectory, 10);
        report.note_storage_error(StorageError::NotOpen);
        report.note_storage_error(StorageError::write_failed("LOG01.CSV", "full"));
        assert_eq!(report.storage_error, Some(StorageError::NotOpen));
    }
}
