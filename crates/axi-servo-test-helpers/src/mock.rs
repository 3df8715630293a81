//! Mock register banks and log sinks.

use axi_servo_errors::{RegisterError, RegisterResult, StorageError, StorageResult};
use axi_servo_logging::{LogSink, MemoryLogSink, SampleRecord};
use axi_servo_registers::{MemoryRegisterBank, RegisterInterface, RegisterOffset};

use crate::ticks::TickProbe;

/// One observed register write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterWrite {
    /// Tick of the source when the write happened, if a probe is attached
    pub tick: Option<u64>,
    /// Block base address
    pub base: u32,
    /// Byte offset
    pub offset: u32,
    /// Written word
    pub value: u32,
}

/// A register bank that records every write.
///
/// With [`RecordingRegisters::with_tracking`] the actual-position register
/// follows each desired write at a fixed lag, a crude stand-in for a plant.
#[derive(Debug, Clone, Default)]
pub struct RecordingRegisters {
    bank: MemoryRegisterBank,
    writes: Vec<RegisterWrite>,
    reads: usize,
    probe: Option<TickProbe>,
    tracking_lag: Option<i32>,
}

impl RecordingRegisters {
    /// Bank with zeroed blocks at `bases`.
    pub fn new(bases: impl IntoIterator<Item = u32>) -> Self {
        Self {
            bank: MemoryRegisterBank::with_blocks(bases),
            ..Self::default()
        }
    }

    /// Stamp writes with the tick seen through `probe`.
    pub fn with_probe(mut self, probe: TickProbe) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Make actual = desired - `lag` after each desired write.
    pub fn with_tracking(mut self, lag: i32) -> Self {
        self.tracking_lag = Some(lag);
        self
    }

    /// Every write in order.
    pub fn writes(&self) -> &[RegisterWrite] {
        &self.writes
    }

    /// Desired-position writes to `base`, as `(tick, position)`.
    pub fn desired_writes(&self, base: u32) -> Vec<(Option<u64>, i32)> {
        self.writes
            .iter()
            .filter(|w| w.base == base && w.offset == RegisterOffset::Desired.bytes())
            .map(|w| (w.tick, w.value.cast_signed()))
            .collect()
    }

    /// Number of reads.
    pub fn read_count(&self) -> usize {
        self.reads
    }

    /// The backing bank.
    pub fn bank(&self) -> &MemoryRegisterBank {
        &self.bank
    }

    /// Mutable access to the backing bank.
    pub fn bank_mut(&mut self) -> &mut MemoryRegisterBank {
        &mut self.bank
    }
}

impl RegisterInterface for RecordingRegisters {
    fn write32(&mut self, base: u32, offset: u32, value: u32) -> RegisterResult {
        self.bank.write32(base, offset, value)?;
        self.writes.push(RegisterWrite {
            tick: self.probe.as_ref().map(TickProbe::current),
            base,
            offset,
            value,
        });
        if let Some(lag) = self.tracking_lag
            && offset == RegisterOffset::Desired.bytes()
        {
            self.bank
                .set_actual(base, value.cast_signed().saturating_sub(lag))?;
        }
        Ok(())
    }

    fn read32(&mut self, base: u32, offset: u32) -> RegisterResult<u32> {
        self.reads += 1;
        self.bank.read32(base, offset)
    }
}

/// A register bank that starts failing after a number of accesses.
#[derive(Debug, Clone, Default)]
pub struct FaultyRegisters {
    bank: MemoryRegisterBank,
    writes_before_failure: Option<usize>,
    reads_before_failure: Option<usize>,
    writes: usize,
    reads: usize,
}

impl FaultyRegisters {
    /// Healthy bank with zeroed blocks at `bases`.
    pub fn new(bases: impl IntoIterator<Item = u32>) -> Self {
        Self {
            bank: MemoryRegisterBank::with_blocks(bases),
            ..Self::default()
        }
    }

    /// Let `n` writes succeed, then fail every write.
    pub fn fail_writes_after(mut self, n: usize) -> Self {
        self.writes_before_failure = Some(n);
        self
    }

    /// Let `n` reads succeed, then fail every read.
    pub fn fail_reads_after(mut self, n: usize) -> Self {
        self.reads_before_failure = Some(n);
        self
    }

    /// Successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Successful reads so far.
    pub fn read_count(&self) -> usize {
        self.reads
    }

    /// The backing bank.
    pub fn bank(&self) -> &MemoryRegisterBank {
        &self.bank
    }
}

impl RegisterInterface for FaultyRegisters {
    fn write32(&mut self, base: u32, offset: u32, value: u32) -> RegisterResult {
        if self.writes_before_failure.is_some_and(|n| self.writes >= n) {
            return Err(RegisterError::WriteFailed { base, offset });
        }
        self.bank.write32(base, offset, value)?;
        self.writes += 1;
        Ok(())
    }

    fn read32(&mut self, base: u32, offset: u32) -> RegisterResult<u32> {
        if self.reads_before_failure.is_some_and(|n| self.reads >= n) {
            return Err(RegisterError::ReadFailed { base, offset });
        }
        let value = self.bank.read32(base, offset)?;
        self.reads += 1;
        Ok(value)
    }
}

/// A memory sink with injectable storage failures.
#[derive(Debug, Clone, Default)]
pub struct FailingLogSink {
    inner: MemoryLogSink,
    fail_open: bool,
    rows_before_failure: Option<usize>,
    fail_flush: bool,
    rows: usize,
}

impl FailingLogSink {
    /// Sink whose every open fails, like a missing medium.
    pub fn unavailable() -> Self {
        Self {
            fail_open: true,
            ..Self::default()
        }
    }

    /// Sink that accepts `n` rows, then fails every write.
    pub fn fail_rows_after(n: usize) -> Self {
        Self {
            rows_before_failure: Some(n),
            ..Self::default()
        }
    }

    /// Sink whose flushes fail.
    pub fn fail_flush() -> Self {
        Self {
            fail_flush: true,
            ..Self::default()
        }
    }

    /// What reached storage before the failure.
    pub fn inner(&self) -> &MemoryLogSink {
        &self.inner
    }
}

impl LogSink for FailingLogSink {
    fn ensure_open(&mut self, name: &str) -> StorageResult {
        if self.fail_open {
            return Err(StorageError::open_failed(name, "no medium"));
        }
        self.inner.ensure_open(name)
    }

    fn write_header_once(&mut self, columns: &[String]) -> StorageResult {
        self.inner.write_header_once(columns)
    }

    fn append_row(&mut self, record: &SampleRecord) -> StorageResult {
        if self.rows_before_failure.is_some_and(|n| self.rows >= n) {
            let name = self.inner.open_file().unwrap_or("?").to_string();
            return Err(StorageError::write_failed(name, "medium full"));
        }
        self.inner.append_row(record)?;
        self.rows += 1;
        Ok(())
    }

    fn flush(&mut self) -> StorageResult {
        if self.fail_flush && self.inner.open_file().is_some() {
            let name = self.inner.open_file().unwrap_or("?").to_string();
            return Err(StorageError::sync_failed(name, "medium removed"));
        }
        self.inner.flush()
    }

    fn close(&mut self) -> StorageResult {
        let flushed = self.flush();
        // the file handle is released even when the flush failed
        let closed = if flushed.is_err() {
            self.fail_flush = false;
            let r = self.inner.close();
            self.fail_flush = true;
            r
        } else {
            self.inner.close()
        };
        flushed.and(closed)
    }

    fn open_file(&self) -> Option<&str> {
        self.inner.open_file()
    }
}
