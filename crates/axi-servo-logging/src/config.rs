//! Logging configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::naming::LogNaming;

/// How motions are logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether logging starts enabled
    pub enabled: bool,
    /// Directory that receives log files
    pub directory: PathBuf,
    /// Start a new file at the beginning of every motion
    pub rotate_per_motion: bool,
    /// File naming scheme
    pub naming: LogNaming,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: PathBuf::from("logs"),
            rotate_per_motion: false,
            naming: LogNaming::default(),
        }
    }
}

impl LoggingConfig {
    /// Disabled logging with default naming.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}
