//! Sample records and their CSV form.

use core::fmt;

use axi_servo_registers::{GainSet, Position};
use serde::{Deserialize, Serialize};

/// Columns before the per-axis block.
const LEADING_COLUMNS: [&str; 5] = ["Time_ms", "Delta_ms", "Kp", "Ki", "Kd"];

/// Commanded and measured position of one axis at one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisSample {
    /// Position written to the desired register
    pub desired: Position,
    /// Position read back from the actual register
    pub actual: Position,
}

impl AxisSample {
    /// Create a sample.
    pub const fn new(desired: Position, actual: Position) -> Self {
        Self { desired, actual }
    }

    /// Tracking error `desired - actual`, widened so it cannot overflow.
    #[inline]
    pub fn error(&self) -> i64 {
        i64::from(self.desired) - i64::from(self.actual)
    }
}

/// One logged sample of a motion.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SampleRecord {
    /// Milliseconds since the motion started
    pub elapsed_ms: u64,
    /// Milliseconds since the previous record of the motion
    pub delta_ms: u64,
    /// Gains of the first axis, for auditing. The row format carries one
    /// gain set; other axes' gains are not logged.
    pub gains: GainSet,
    /// One entry per axis, in axis order
    pub axes: Vec<AxisSample>,
}

impl SampleRecord {
    /// Append this record as a CSV row, without a line terminator.
    ///
    /// # Errors
    ///
    /// Propagates formatter errors from `out`.
    pub fn write_csv(&self, out: &mut impl fmt::Write) -> fmt::Result {
        write!(
            out,
            "{},{},{:.3},{:.3},{:.3}",
            self.elapsed_ms, self.delta_ms, self.gains.kp, self.gains.ki, self.gains.kd
        )?;
        for axis in &self.axes {
            write!(out, ",{},{},{}", axis.desired, axis.actual, axis.error())?;
        }
        Ok(())
    }

    /// This record as a CSV row, without a line terminator.
    pub fn csv_row(&self) -> String {
        let mut row = String::with_capacity(32 + 24 * self.axes.len());
        // writing into a String cannot fail
        if self.write_csv(&mut row).is_err() {
            row.clear();
        }
        row
    }
}

/// Header columns for a motion over `axis_count` axes.
///
/// Per-axis columns are numbered from 1: `Des1,Act1,Err1,Des2,...`.
pub fn csv_header(axis_count: usize) -> Vec<String> {
    let mut columns: Vec<String> = LEADING_COLUMNS.iter().map(|c| (*c).to_string()).collect();
    for n in 1..=axis_count {
        columns.push(format!("Des{n}"));
        columns.push(format!("Act{n}"));
        columns.push(format!("Err{n}"));
    }
    columns
}
