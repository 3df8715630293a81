//! Input validation error types.
//!
//! Raised for operator input before anything is written to hardware, so the
//! caller may retry freely with corrected values.

use crate::common::ErrorSeverity;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Value out of range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Field name
        field: String,
        /// The invalid value
        value: String,
        /// Minimum allowed value
        min: String,
        /// Maximum allowed value
        max: String,
    },

    /// Value is not a finite number
    #[error("{field} must be a finite number")]
    NotFinite {
        /// Field name
        field: String,
    },

    /// Wrong number of per-axis values
    #[error("Expected {expected} {field} value(s), got {actual}")]
    CountMismatch {
        /// Field name
        field: String,
        /// Number of configured axes
        expected: usize,
        /// Number of supplied values
        actual: usize,
    },
}

impl ValidationError {
    /// Create an out-of-range error.
    pub fn out_of_range<T: ToString>(field: impl Into<String>, value: T, min: T, max: T) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    /// Create a non-finite number error.
    pub fn not_finite(field: impl Into<String>) -> Self {
        ValidationError::NotFinite {
            field: field.into(),
        }
    }

    /// Create a count mismatch error.
    pub fn count_mismatch(field: impl Into<String>, expected: usize, actual: usize) -> Self {
        ValidationError::CountMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let err = ValidationError::out_of_range("Kd", 200.0, 0.0, 127.996);
        assert_eq!(err.to_string(), "Kd value 200 is out of range [0, 127.996]");
    }

    #[test]
    fn test_count_mismatch_display() {
        let err = ValidationError::count_mismatch("target", 2, 1);
        assert_eq!(err.to_string(), "Expected 2 target value(s), got 1");
    }
}
