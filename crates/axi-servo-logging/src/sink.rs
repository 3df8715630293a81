//! The log storage seam.

use axi_servo_errors::StorageResult;

use crate::record::SampleRecord;

/// Destination for sample rows.
///
/// A sink holds at most one open file. Opening a different name closes the
/// current file first. The header is tracked per file: `write_header_once`
/// writes it before the first row of a file and is a no-op afterwards.
pub trait LogSink {
    /// Make `name` the open file, creating or truncating it if it is not
    /// already the open file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::OpenFailed` if the file cannot be created.
    fn ensure_open(&mut self, name: &str) -> StorageResult;

    /// Write the header line unless this file already has one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotOpen` without an open file, or a write error.
    fn write_header_once(&mut self, columns: &[String]) -> StorageResult;

    /// Append one record as a data row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotOpen` without an open file, or a write error.
    fn append_row(&mut self, record: &SampleRecord) -> StorageResult;

    /// Push buffered rows to the medium.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::SyncFailed` if the medium rejects the flush.
    fn flush(&mut self) -> StorageResult;

    /// Flush and close the open file, if any.
    ///
    /// # Errors
    ///
    /// Returns the flush error; the file is considered closed regardless.
    fn close(&mut self) -> StorageResult;

    /// Name of the open file.
    fn open_file(&self) -> Option<&str>;
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn ensure_open(&mut self, name: &str) -> StorageResult {
        (**self).ensure_open(name)
    }

    fn write_header_once(&mut self, columns: &[String]) -> StorageResult {
        (**self).write_header_once(columns)
    }

    fn append_row(&mut self, record: &SampleRecord) -> StorageResult {
        (**self).append_row(record)
    }

    fn flush(&mut self) -> StorageResult {
        (**self).flush()
    }

    fn close(&mut self) -> StorageResult {
        (**self).close()
    }

    fn open_file(&self) -> Option<&str> {
        (**self).open_file()
    }
}
