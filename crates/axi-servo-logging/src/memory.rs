//! In-memory log sink.

use std::collections::BTreeMap;

use axi_servo_errors::{StorageError, StorageResult};

use crate::record::SampleRecord;
use crate::sink::LogSink;

/// Keeps every log as a list of lines in memory.
///
/// Useful on hosts without storage and for inspecting exactly what a motion
/// would have written. Reopening a name truncates it, like the file sink.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogSink {
    files: BTreeMap<String, Vec<String>>,
    current: Option<String>,
    header_written: bool,
    flushes: u64,
    closes: u64,
}

impl MemoryLogSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines of a file, header included.
    pub fn lines(&self, name: &str) -> Option<&[String]> {
        self.files.get(name).map(Vec::as_slice)
    }

    /// Names of every file created so far, in name order.
    pub fn file_names(&self) -> Vec<&str> {
        self.files.keys().map(String::as_str).collect()
    }

    /// Number of successful flushes.
    pub fn flush_count(&self) -> u64 {
        self.flushes
    }

    /// Number of closes of an open file.
    pub fn close_count(&self) -> u64 {
        self.closes
    }

    fn current_lines(&mut self) -> StorageResult<&mut Vec<String>> {
        let name = self.current.as_ref().ok_or(StorageError::NotOpen)?;
        self.files.get_mut(name).ok_or(StorageError::NotOpen)
    }
}

impl LogSink for MemoryLogSink {
    fn ensure_open(&mut self, name: &str) -> StorageResult {
        if self.current.as_deref() == Some(name) {
            return Ok(());
        }
        self.close()?;
        self.files.insert(name.to_string(), Vec::new());
        self.current = Some(name.to_string());
        self.header_written = false;
        Ok(())
    }

    fn write_header_once(&mut self, columns: &[String]) -> StorageResult {
        if self.current.is_some() && self.header_written {
            return Ok(());
        }
        let header = columns.join(",");
        self.current_lines()?.push(header);
        self.header_written = true;
        Ok(())
    }

    fn append_row(&mut self, record: &SampleRecord) -> StorageResult {
        let row = record.csv_row();
        self.current_lines()?.push(row);
        Ok(())
    }

    fn flush(&mut self) -> StorageResult {
        if self.current.is_some() {
            self.flushes = self.flushes.saturating_add(1);
        }
        Ok(())
    }

    fn close(&mut self) -> StorageResult {
        if self.current.is_some() {
            self.flush()?;
            self.closes = self.closes.saturating_add(1);
        }
        self.current = None;
        self.header_written = false;
        Ok(())
    }

    fn open_file(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_written_once_per_file() -> StorageResult {
        let mut sink = MemoryLogSink::new();
        let columns = vec!["A".to_string()];
        sink.ensure_open("LOG01.CSV")?;
        sink.write_header_once(&columns)?;
        sink.write_header_once(&columns)?;
        sink.ensure_open("LOG02.CSV")?;
        sink.write_header_once(&columns)?;

        assert_eq!(sink.lines("LOG01.CSV").map(<[String]>::len), Some(1));
        assert_eq!(sink.lines("LOG02.CSV").map(<[String]>::len), Some(1));
        assert_eq!(sink.close_count(), 1);
        Ok(())
    }

    #[test]
    fn test_reopen_truncates() -> StorageResult {
        let mut sink = MemoryLogSink::new();
        sink.ensure_open("LOG01.CSV")?;
        sink.append_row(&SampleRecord::default())?;
        sink.close()?;
        sink.ensure_open("LOG01.CSV")?;
        assert_eq!(sink.lines("LOG01.CSV").map(<[String]>::len), Some(0));
        Ok(())
    }

    #[test]
    fn test_requires_open_file() {
        let mut sink = MemoryLogSink::new();
        assert_eq!(
            sink.write_header_once(&[]),
            Err(StorageError::NotOpen)
        );
    }
}
