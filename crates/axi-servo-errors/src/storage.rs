//! Log storage error types.

use crate::common::ErrorSeverity;

/// The log sink could not be opened or written.
///
/// Storage failures never abort a motion: the loop drops logging for the rest
/// of the session and reports the failure in the motion report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The log file could not be created
    #[error("Storage unavailable: cannot open {name}: {reason}")]
    OpenFailed {
        /// File name that was being opened
        name: String,
        /// Underlying failure
        reason: String,
    },

    /// A header or data row could not be written
    #[error("Storage unavailable: write to {name} failed: {reason}")]
    WriteFailed {
        /// File name being written
        name: String,
        /// Underlying failure
        reason: String,
    },

    /// Flushing buffered rows to the medium failed
    #[error("Storage unavailable: sync of {name} failed: {reason}")]
    SyncFailed {
        /// File name being synced
        name: String,
        /// Underlying failure
        reason: String,
    },

    /// A row was appended while no file was open
    #[error("Storage unavailable: no log file is open")]
    NotOpen,
}

impl StorageError {
    /// Create an open failure from any displayable cause.
    pub fn open_failed(name: impl Into<String>, reason: impl core::fmt::Display) -> Self {
        StorageError::OpenFailed {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a write failure from any displayable cause.
    pub fn write_failed(name: impl Into<String>, reason: impl core::fmt::Display) -> Self {
        StorageError::WriteFailed {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a sync failure from any displayable cause.
    pub fn sync_failed(name: impl Into<String>, reason: impl core::fmt::Display) -> Self {
        StorageError::SyncFailed {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Warning
    }
}
