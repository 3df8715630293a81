//! Driver configuration.

use std::collections::BTreeSet;
use std::path::Path;

use axi_servo_clock::DEFAULT_COMMAND_HZ;
use axi_servo_errors::{ResultExt, ServoError, ServoResult};
use axi_servo_logging::LoggingConfig;
use axi_servo_registers::Axis;
use serde::{Deserialize, Serialize};

/// Global timer frequency of the Zynq-7000 application processor.
pub const DEFAULT_COUNTER_HZ: u64 = 333_333_343;

/// Default duration of each phase of a forward-and-return motion.
pub const DEFAULT_PHASE_MS: u64 = 1_000;

/// Default length of a step-response capture.
pub const DEFAULT_STEP_CAPTURE_MS: u64 = 5_000;

/// Configuration of a [`ControlLoopDriver`](crate::ControlLoopDriver).
///
/// Every field has a default, so a config file only needs the values it
/// changes:
///
/// ```yaml
/// command_hz: 2500
/// axes:
///   - name: pan
///     base_address: 0x43C00000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Frequency of the free-running tick counter (Hz)
    pub counter_hz: u64,
    /// Rate at which desired positions are issued and samples taken (Hz)
    pub command_hz: u32,
    /// Duration of each phase of a forward-and-return motion (ms)
    pub phase_ms: u64,
    /// Duration of a step-response capture (ms)
    pub step_capture_ms: u64,
    /// Sample logging
    pub logging: LoggingConfig,
    /// Controlled axes, in log column order
    pub axes: Vec<Axis>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            counter_hz: DEFAULT_COUNTER_HZ,
            command_hz: DEFAULT_COMMAND_HZ,
            phase_ms: DEFAULT_PHASE_MS,
            step_capture_ms: DEFAULT_STEP_CAPTURE_MS,
            logging: LoggingConfig::default(),
            axes: vec![
                Axis::new("axis1", 0x43C0_0000),
                Axis::new("axis2", 0x43C1_0000),
            ],
        }
    }
}

impl DriverConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ServoError::Config` describing the first invalid value.
    pub fn validate(&self) -> ServoResult<()> {
        if self.counter_hz < 1_000 {
            return Err(ServoError::config("counter_hz must be at least 1000"));
        }
        if self.command_hz == 0 {
            return Err(ServoError::config("command_hz must be greater than 0"));
        }
        if u64::from(self.command_hz) > self.counter_hz {
            return Err(ServoError::config(
                "command_hz must not exceed counter_hz",
            ));
        }
        if self.logging.naming.max_sequence == 0 {
            return Err(ServoError::config(
                "logging.naming.max_sequence must be greater than 0",
            ));
        }
        let mut bases = BTreeSet::new();
        for axis in &self.axes {
            if axis.name.trim().is_empty() {
                return Err(ServoError::config("axis names must not be empty"));
            }
            if axis.base_address % 4 != 0 {
                return Err(ServoError::config(format!(
                    "axis {} base address {:#010x} is not word aligned",
                    axis.name, axis.base_address
                )));
            }
            if !bases.insert(axis.base_address) {
                return Err(ServoError::config(format!(
                    "base address {:#010x} is used by more than one axis",
                    axis.base_address
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a YAML document.
    ///
    /// # Errors
    ///
    /// Returns `ServoError::Config` for malformed YAML or invalid values.
    pub fn from_yaml_str(text: &str) -> ServoResult<Self> {
        let config: Self = serde_yaml::from_str(text)
            .map_err(|e| ServoError::config(format!("invalid YAML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `ServoError::Config` for malformed JSON or invalid values.
    pub fn from_json_str(text: &str) -> ServoResult<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| ServoError::config(format!("invalid JSON config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, choosing the format from its extension
    /// (`.json`, otherwise YAML).
    ///
    /// # Errors
    ///
    /// Returns `ServoError::Io` naming the path if the file cannot be read,
    /// or the parse and validation errors of the chosen format.
    pub fn load(path: impl AsRef<Path>) -> ServoResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_operation(&format!("load driver config {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns `ServoError::Config` if serialization fails.
    pub fn to_yaml_string(&self) -> ServoResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| ServoError::config(format!("cannot serialize config: {e}")))
    }

    /// Duration of a forward-and-return motion (ms).
    pub fn motion_duration_ms(&self) -> u64 {
        self.phase_ms.saturating_mul(2)
    }

    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> DriverConfigBuilder {
        DriverConfigBuilder::default()
    }
}

/// Builder for [`DriverConfig`].
#[derive(Debug, Default)]
pub struct DriverConfigBuilder {
    config: DriverConfig,
}

impl DriverConfigBuilder {
    /// Set the tick counter frequency in Hz.
    #[must_use]
    pub fn counter_hz(mut self, hz: u64) -> Self {
        self.config.counter_hz = hz;
        self
    }

    /// Set the command rate in Hz.
    #[must_use]
    pub fn command_hz(mut self, hz: u32) -> Self {
        self.config.command_hz = hz;
        self
    }

    /// Set the phase duration in milliseconds.
    #[must_use]
    pub fn phase_ms(mut self, ms: u64) -> Self {
        self.config.phase_ms = ms;
        self
    }

    /// Set the step-capture duration in milliseconds.
    #[must_use]
    pub fn step_capture_ms(mut self, ms: u64) -> Self {
        self.config.step_capture_ms = ms;
        self
    }

    /// Set the logging configuration.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Replace the axis list.
    #[must_use]
    pub fn axes(mut self, axes: Vec<Axis>) -> Self {
        self.config.axes = axes;
        self
    }

    /// Append one axis.
    #[must_use]
    pub fn axis(mut self, name: impl Into<String>, base_address: u32) -> Self {
        self.config.axes.push(Axis::new(name, base_address));
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> ServoResult<DriverConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
