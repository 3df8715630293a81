//! Top-level error type and classification shared by all axi-servo crates.

use core::fmt;

use crate::{RegisterError, StorageError, ValidationError};

/// Top-level error type wrapping every axi-servo sub-error.
#[derive(Debug, thiserror::Error)]
pub enum ServoError {
    /// Operator input rejected before any register write
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Register bus failure
    #[error("Register error: {0}")]
    Register(#[from] RegisterError),

    /// Log storage failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors outside the log sink (e.g. reading a config file)
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),
}

impl ServoError {
    /// Get the error category for classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ServoError::Validation(_) => ErrorCategory::Validation,
            ServoError::Register(_) => ErrorCategory::Register,
            ServoError::Storage(_) => ErrorCategory::Storage,
            ServoError::Config(_) => ErrorCategory::Config,
            ServoError::Io(_) => ErrorCategory::IO,
        }
    }

    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ServoError::Validation(e) => e.severity(),
            ServoError::Register(e) => e.severity(),
            ServoError::Storage(e) => e.severity(),
            ServoError::Config(_) => ErrorSeverity::Error,
            ServoError::Io(_) => ErrorSeverity::Error,
        }
    }

    /// Check if the caller may simply retry with new input or later.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }

    /// Create a configuration error with a message.
    pub fn config(msg: impl Into<String>) -> Self {
        ServoError::Config(msg.into())
    }
}

impl From<std::io::Error> for ServoError {
    fn from(e: std::io::Error) -> Self {
        ServoError::Io(e)
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Input validation errors
    Validation = 0,
    /// Register bus errors
    Register = 1,
    /// Log storage errors
    Storage = 2,
    /// Configuration errors
    Config = 3,
    /// I/O errors
    IO = 4,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Validation => write!(f, "Validation"),
            ErrorCategory::Register => write!(f, "Register"),
            ErrorCategory::Storage => write!(f, "Storage"),
            ErrorCategory::Config => write!(f, "Config"),
            ErrorCategory::IO => write!(f, "IO"),
        }
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, operation continued in degraded form
    Warning = 1,
    /// Error, operation failed
    Error = 2,
    /// Critical, the motion in progress was aborted
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Extension trait for attaching an operation name to an error.
pub trait ResultExt<T> {
    /// Wrap the error as a [`ServoError`], prefixing the operation name for
    /// configuration and I/O failures. I/O errors keep their kind.
    fn with_operation(self, operation: &str) -> Result<T, ServoError>;
}

impl<T, E: Into<ServoError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_operation(self, operation: &str) -> Result<T, ServoError> {
        self.map_err(|e| match e.into() {
            ServoError::Config(msg) => ServoError::Config(format!("{operation}: {msg}")),
            ServoError::Io(io) => {
                ServoError::Io(std::io::Error::new(io.kind(), format!("{operation}: {io}")))
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::Register.to_string(), "Register");
        assert_eq!(ErrorCategory::Storage.to_string(), "Storage");
        assert_eq!(ErrorCategory::IO.to_string(), "IO");
    }

    #[test]
    fn test_error_severity_ordering() {
        assert!(ErrorSeverity::Critical > ErrorSeverity::Error);
        assert!(ErrorSeverity::Error > ErrorSeverity::Warning);
        assert!(ErrorSeverity::Warning > ErrorSeverity::Info);
    }

    #[test]
    fn test_servo_error_category() {
        let err: ServoError = RegisterError::ReadFailed {
            base: 0x4000_0000,
            offset: 0x08,
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Register);

        let err = ServoError::config("bad");
        assert_eq!(err.category(), ErrorCategory::Config);
    }

    #[test]
    fn test_register_fault_is_not_recoverable() {
        let err: ServoError = RegisterError::Unresponsive { base: 0x4000_0000 }.into();
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_with_operation_prefixes_config_errors() {
        let result: Result<(), ServoError> = Err(ServoError::config("missing axes"));
        let wrapped = result.with_operation("load_config");
        assert!(matches!(
            &wrapped,
            Err(e) if e.to_string() == "Configuration error: load_config: missing axes"
        ));
    }

    #[test]
    fn test_with_operation_keeps_io_kind() {
        let result: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"));
        let err = result.with_operation("read servo.yaml");
        assert!(matches!(
            &err,
            Err(ServoError::Io(io)) if io.kind() == std::io::ErrorKind::NotFound
                && io.to_string() == "read servo.yaml: no such file"
        ));
    }
}
