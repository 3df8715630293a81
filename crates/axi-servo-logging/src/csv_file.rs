//! CSV files in a directory.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use axi_servo_errors::{StorageError, StorageResult};
use tracing::{debug, info};

use crate::record::SampleRecord;
use crate::sink::LogSink;

struct OpenLog {
    name: String,
    writer: BufWriter<File>,
    header_written: bool,
    rows: u64,
}

/// Writes each log as a CSV file inside one directory.
///
/// Files are created with truncation, so a wrapped sequence number replaces
/// the old file. Rows are buffered and reach the medium on `flush` or `close`.
pub struct CsvFileSink {
    directory: PathBuf,
    current: Option<OpenLog>,
    line: String,
}

impl std::fmt::Debug for CsvFileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvFileSink")
            .field("directory", &self.directory)
            .field("open_file", &self.open_file())
            .finish()
    }
}

impl CsvFileSink {
    /// Sink writing into `directory`, created on first open if missing.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            current: None,
            line: String::new(),
        }
    }

    /// Directory receiving the files.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Full path of a log file by name.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.directory.join(name)
    }

    fn current_mut(&mut self) -> StorageResult<&mut OpenLog> {
        self.current.as_mut().ok_or(StorageError::NotOpen)
    }
}

impl LogSink for CsvFileSink {
    fn ensure_open(&mut self, name: &str) -> StorageResult {
        if self.open_file() == Some(name) {
            return Ok(());
        }
        self.close()?;

        fs::create_dir_all(&self.directory).map_err(|e| StorageError::open_failed(name, e))?;
        let path = self.path_of(name);
        let file = File::create(&path).map_err(|e| StorageError::open_failed(name, e))?;
        info!(path = %path.display(), "log file opened");

        self.current = Some(OpenLog {
            name: name.to_string(),
            writer: BufWriter::new(file),
            header_written: false,
            rows: 0,
        });
        Ok(())
    }

    fn write_header_once(&mut self, columns: &[String]) -> StorageResult {
        let log = self.current_mut()?;
        if log.header_written {
            return Ok(());
        }
        writeln!(log.writer, "{}", columns.join(","))
            .map_err(|e| StorageError::write_failed(log.name.as_str(), e))?;
        log.header_written = true;
        Ok(())
    }

    fn append_row(&mut self, record: &SampleRecord) -> StorageResult {
        self.line.clear();
        record
            .write_csv(&mut self.line)
            .map_err(|e| StorageError::write_failed("row", e))?;
        self.line.push('\n');

        let log = self.current.as_mut().ok_or(StorageError::NotOpen)?;
        log.writer
            .write_all(self.line.as_bytes())
            .map_err(|e| StorageError::write_failed(log.name.as_str(), e))?;
        log.rows = log.rows.saturating_add(1);
        Ok(())
    }

    fn flush(&mut self) -> StorageResult {
        let Some(log) = self.current.as_mut() else {
            return Ok(());
        };
        log.writer
            .flush()
            .and_then(|()| log.writer.get_ref().sync_data())
            .map_err(|e| StorageError::sync_failed(log.name.as_str(), e))
    }

    fn close(&mut self) -> StorageResult {
        let result = self.flush();
        if let Some(log) = self.current.take() {
            debug!(file = %log.name, rows = log.rows, "log file closed");
        }
        result
    }

    fn open_file(&self) -> Option<&str> {
        self.current.as_ref().map(|log| log.name.as_str())
    }
}

impl Drop for CsvFileSink {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, "log file not flushed on drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_rows_require_open_file() {
        let mut sink = CsvFileSink::new("unused");
        assert_eq!(
            sink.append_row(&SampleRecord::default()),
            Err(StorageError::NotOpen)
        );
        assert_eq!(sink.flush(), Ok(()));
    }

    #[test]
    fn test_reopen_same_name_keeps_header_state() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut sink = CsvFileSink::new(dir.path());
        let columns = vec!["A".to_string(), "B".to_string()];

        sink.ensure_open("LOG01.CSV")?;
        sink.write_header_once(&columns)?;
        sink.ensure_open("LOG01.CSV")?;
        sink.write_header_once(&columns)?;
        sink.close()?;

        let text = fs::read_to_string(dir.path().join("LOG01.CSV"))?;
        assert_eq!(text, "A,B\n");
        Ok(())
    }

    #[test]
    fn test_creates_missing_directory() -> TestResult {
        let dir = tempfile::tempdir()?;
        let nested = dir.path().join("sd").join("logs");
        let mut sink = CsvFileSink::new(&nested);
        sink.ensure_open("LOG01.CSV")?;
        sink.close()?;
        assert!(nested.join("LOG01.CSV").exists());
        Ok(())
    }
}
