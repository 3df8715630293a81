//! Sample logging for axi-servo motions.
//!
//! Every commanded sample of a motion becomes one CSV row. Rows go to a
//! [`LogSink`], which owns at most one open file at a time and writes the
//! column header exactly once per file. [`LoggingSession`] sits on top and
//! decides when files are opened, rotated, flushed and closed.
//!
//! File names follow an 8.3-friendly rotating sequence (`LOG01.CSV`,
//! `LOG02.CSV`, ...), see [`LogNaming`].
//!
//! Storage failures never stop a motion: the session logs a warning, turns
//! itself off and hands the error back for reporting.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod config;
pub mod csv_file;
pub mod memory;
pub mod naming;
pub mod record;
pub mod session;
pub mod sink;

pub use config::LoggingConfig;
pub use csv_file::CsvFileSink;
pub use memory::MemoryLogSink;
pub use naming::LogNaming;
pub use record::{AxisSample, SampleRecord, csv_header};
pub use session::LoggingSession;
pub use sink::LogSink;
