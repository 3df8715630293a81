//! Logging state owned by the control loop driver.

use axi_servo_errors::{StorageError, StorageResult};
use tracing::{debug, info, warn};

use crate::config::LoggingConfig;
use crate::naming::LogNaming;
use crate::record::{SampleRecord, csv_header};
use crate::sink::LogSink;

/// Decides when log files open, rotate, flush and close.
///
/// The session carries the logging flag and the file sequence counter. Any
/// storage failure turns logging off and is handed back to the caller, so a
/// motion keeps running without logging. Logging comes back only through
/// [`LoggingSession::enable`] or [`LoggingSession::toggle`], which start a
/// fresh file.
#[derive(Debug)]
pub struct LoggingSession<S> {
    sink: S,
    naming: LogNaming,
    rotate_per_motion: bool,
    enabled: bool,
    next_sequence: u32,
    columns: Vec<String>,
}

impl<S: LogSink> LoggingSession<S> {
    /// Session for motions over `axis_count` axes. No file is opened until the
    /// first motion or an explicit enable.
    pub fn new(sink: S, config: &LoggingConfig, axis_count: usize) -> Self {
        Self {
            sink,
            naming: config.naming.clone(),
            rotate_per_motion: config.rotate_per_motion,
            enabled: config.enabled,
            next_sequence: 1,
            columns: csv_header(axis_count),
        }
    }

    /// Whether samples are currently logged.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Name of the open log file.
    pub fn current_file(&self) -> Option<&str> {
        self.sink.open_file()
    }

    /// Header columns written at the top of each file.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Sequence number the next file will get.
    pub fn next_sequence(&self) -> u32 {
        self.next_sequence
    }

    /// The underlying sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the underlying sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Close the current file and open the next name in the sequence.
    ///
    /// # Errors
    ///
    /// Returns the open failure; logging is turned off in that case.
    pub fn start_file(&mut self) -> StorageResult<String> {
        if let Err(e) = self.sink.close() {
            warn!(error = %e, "previous log file did not close cleanly");
        }
        let name = self.naming.file_name(self.next_sequence);
        if let Err(e) = self.sink.ensure_open(&name) {
            return Err(self.fail(e));
        }
        self.next_sequence = self.naming.next(self.next_sequence);
        info!(file = %name, "logging to new file");
        Ok(name)
    }

    /// Prepare for a motion: open a file if none is open, or rotate when
    /// rotation per motion is configured.
    ///
    /// # Errors
    ///
    /// Returns the open failure; logging is turned off in that case.
    pub fn begin_motion(&mut self) -> StorageResult {
        if !self.enabled {
            return Ok(());
        }
        if self.rotate_per_motion || self.sink.open_file().is_none() {
            self.start_file()?;
        }
        Ok(())
    }

    /// Log one sample, writing the header first on a fresh file.
    ///
    /// # Errors
    ///
    /// Returns the write failure; logging is turned off in that case.
    pub fn record(&mut self, record: &SampleRecord) -> StorageResult {
        if !self.enabled {
            return Ok(());
        }
        let result = self
            .sink
            .write_header_once(&self.columns)
            .and_then(|()| self.sink.append_row(record));
        result.map_err(|e| self.fail(e))
    }

    /// Flush rows written during the motion.
    ///
    /// # Errors
    ///
    /// Returns the sync failure; logging is turned off in that case.
    pub fn finish_motion(&mut self) -> StorageResult {
        if !self.enabled {
            return Ok(());
        }
        self.sink.flush().map_err(|e| self.fail(e))
    }

    /// Turn logging on, starting a new file. No-op if already on.
    ///
    /// # Errors
    ///
    /// Returns the open failure; logging stays off in that case.
    pub fn enable(&mut self) -> StorageResult {
        if self.enabled {
            return Ok(());
        }
        self.enabled = true;
        self.start_file().map(|_| ())
    }

    /// Turn logging off and close the file.
    ///
    /// # Errors
    ///
    /// Returns the close failure; logging is off regardless.
    pub fn disable(&mut self) -> StorageResult {
        self.enabled = false;
        self.sink.close()
    }

    /// Flip logging and return the new state.
    ///
    /// # Errors
    ///
    /// See [`LoggingSession::enable`] and [`LoggingSession::disable`].
    pub fn toggle(&mut self) -> StorageResult<bool> {
        if self.enabled {
            self.disable()?;
        } else {
            self.enable()?;
        }
        Ok(self.enabled)
    }

    /// Forget header state. With logging on this starts a fresh file, so each
    /// file still carries exactly one header.
    ///
    /// # Errors
    ///
    /// Returns the open failure; logging is turned off in that case.
    pub fn reset(&mut self) -> StorageResult {
        if self.enabled {
            self.start_file()?;
        } else if let Err(e) = self.sink.close() {
            debug!(error = %e, "close on reset failed");
        }
        Ok(())
    }

    fn fail(&mut self, error: StorageError) -> StorageError {
        warn!(error = %error, "logging disabled after storage failure");
        self.enabled = false;
        if let Err(close) = self.sink.close() {
            debug!(error = %close, "close after storage failure also failed");
        }
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryLogSink;

    fn session(enabled: bool) -> LoggingSession<MemoryLogSink> {
        let config = LoggingConfig {
            enabled,
            ..LoggingConfig::default()
        };
        LoggingSession::new(MemoryLogSink::new(), &config, 1)
    }

    #[test]
    fn test_no_file_until_first_motion() -> StorageResult {
        let mut s = session(true);
        assert_eq!(s.current_file(), None);
        s.begin_motion()?;
        assert_eq!(s.current_file(), Some("LOG01.CSV"));
        s.begin_motion()?;
        assert_eq!(s.current_file(), Some("LOG01.CSV"));
        Ok(())
    }

    #[test]
    fn test_disabled_session_writes_nothing() -> StorageResult {
        let mut s = session(false);
        s.begin_motion()?;
        s.record(&SampleRecord::default())?;
        s.finish_motion()?;
        assert!(s.sink().file_names().is_empty());
        Ok(())
    }

    #[test]
    fn test_toggle_cycle_opens_new_file() -> StorageResult {
        let mut s = session(true);
        s.begin_motion()?;
        assert!(!s.toggle()?);
        assert_eq!(s.current_file(), None);
        assert!(s.toggle()?);
        assert_eq!(s.current_file(), Some("LOG02.CSV"));
        Ok(())
    }

    #[test]
    fn test_reset_starts_fresh_file_when_enabled() -> StorageResult {
        let mut s = session(true);
        s.begin_motion()?;
        s.record(&SampleRecord::default())?;
        s.reset()?;
        assert_eq!(s.current_file(), Some("LOG02.CSV"));
        assert_eq!(s.next_sequence(), 3);
        Ok(())
    }
}
