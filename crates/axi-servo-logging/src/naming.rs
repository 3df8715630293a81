//! Rotating log file names.

use serde::{Deserialize, Serialize};

/// Produces sequence-numbered file names such as `LOG01.CSV`.
///
/// Sequence numbers start at 1 and wrap back to 1 after `max_sequence`, so
/// the oldest files are overwritten once the sequence is exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogNaming {
    /// File name prefix
    pub stem: String,
    /// Extension, without the dot
    pub extension: String,
    /// Zero-padded width of the sequence number
    pub sequence_width: usize,
    /// Highest sequence number before wrapping to 1
    pub max_sequence: u32,
}

impl Default for LogNaming {
    fn default() -> Self {
        Self {
            stem: "LOG".to_string(),
            extension: "CSV".to_string(),
            sequence_width: 2,
            max_sequence: 99,
        }
    }
}

impl LogNaming {
    /// File name for sequence number `seq`.
    ///
    /// # Examples
    ///
    /// ```
    /// use axi_servo_logging::LogNaming;
    ///
    /// let naming = LogNaming::default();
    /// assert_eq!(naming.file_name(1), "LOG01.CSV");
    /// assert_eq!(naming.file_name(42), "LOG42.CSV");
    /// ```
    pub fn file_name(&self, seq: u32) -> String {
        format!(
            "{}{:0width$}.{}",
            self.stem,
            seq,
            self.extension,
            width = self.sequence_width
        )
    }

    /// Sequence number following `seq`.
    pub fn next(&self, seq: u32) -> u32 {
        if seq >= self.max_sequence.max(1) {
            1
        } else {
            seq.saturating_add(1)
        }
    }
}
