//! The fixed-rate control loop.

use std::sync::atomic::{AtomicBool, Ordering};

use axi_servo_clock::{ClockError, CommandGate, SampleClock, TickSource};
use axi_servo_errors::{RegisterResult, ServoError, ServoResult, ValidationError};
use axi_servo_logging::{AxisSample, LogSink, LoggingSession, SampleRecord};
use axi_servo_registers::{
    Axis, AxisStatus, GainSet, Position, RegisterIndex, RegisterInterface, RegisterOffset,
};
use axi_servo_trajectory::MotionProfile;
use tracing::{debug, error, info, trace};

use crate::config::DriverConfig;
use crate::motion::{MotionKind, MotionOutcome, MotionReport, MotionState, PartialReason};

/// Drives every configured axis through timed motions.
///
/// The driver owns the register transport `R`, the tick source `T` and the
/// log sink `S`. A motion is a synchronous busy poll: each iteration reads the
/// clock, ends the motion once the elapsed time passes the planned duration,
/// and otherwise issues a command whenever one command period has passed.
/// A command evaluates the planner for every axis, writes every desired
/// position, reads back every actual position and logs one sample.
///
/// Because every operation takes `&mut self`, only one motion can run at a
/// time and nothing else touches the registers while it runs.
pub struct ControlLoopDriver<R, T, S> {
    registers: R,
    clock: SampleClock<T>,
    period_ticks: u64,
    config: DriverConfig,
    gains: Vec<GainSet>,
    logging: LoggingSession<S>,
    state: MotionState,
}

impl<R, T, S> std::fmt::Debug for ControlLoopDriver<R, T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlLoopDriver")
            .field("axes", &self.config.axes)
            .field("period_ticks", &self.period_ticks)
            .field("gains", &self.gains)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

fn clock_error(e: ClockError) -> ServoError {
    ServoError::config(e.to_string())
}

fn axis_at(axes: &[Axis], index: usize) -> Result<&Axis, ValidationError> {
    axes.get(index).ok_or_else(|| {
        ValidationError::out_of_range("axis index", index, 0, axes.len().saturating_sub(1))
    })
}

/// One command: evaluate, write every desired position, then read every
/// actual position.
fn command_axes<R: RegisterInterface>(
    registers: &mut R,
    axes: &[Axis],
    profiles: &[MotionProfile],
    write_desired: bool,
    elapsed_ms: u64,
    samples: &mut [AxisSample],
) -> RegisterResult {
    for ((axis, profile), sample) in axes.iter().zip(profiles).zip(samples.iter_mut()) {
        sample.desired = profile.position_at(elapsed_ms);
        if write_desired {
            axis.write_desired(registers, sample.desired)?;
        }
    }
    for (axis, sample) in axes.iter().zip(samples.iter_mut()) {
        sample.actual = axis.read_actual(registers)?;
    }
    Ok(())
}

impl<R, T, S> ControlLoopDriver<R, T, S>
where
    R: RegisterInterface,
    T: TickSource,
    S: LogSink,
{
    /// Build a driver. Nothing is written to hardware until the first
    /// operation.
    ///
    /// # Errors
    ///
    /// Returns `ServoError::Config` if the configuration is invalid.
    pub fn new(registers: R, ticks: T, sink: S, config: DriverConfig) -> ServoResult<Self> {
        config.validate()?;
        let clock = SampleClock::new(ticks, config.counter_hz).map_err(clock_error)?;
        let period_ticks = CommandGate::from_rates(config.counter_hz, config.command_hz)
            .map_err(clock_error)?
            .period_ticks();
        let logging = LoggingSession::new(sink, &config.logging, config.axes.len());
        info!(
            axes = config.axes.len(),
            counter_hz = config.counter_hz,
            command_hz = config.command_hz,
            period_ticks,
            "control loop driver ready"
        );
        Ok(Self {
            registers,
            clock,
            period_ticks,
            gains: vec![GainSet::ZERO; config.axes.len()],
            config,
            logging,
            state: MotionState::Idle,
        })
    }

    /// The configuration the driver was built with.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Controlled axes, in log column order.
    pub fn axes(&self) -> &[Axis] {
        &self.config.axes
    }

    /// Gains last written to each axis, as hardware holds them.
    pub fn gains(&self) -> &[GainSet] {
        &self.gains
    }

    /// Current lifecycle state.
    pub fn state(&self) -> MotionState {
        self.state
    }

    /// Command period in counter ticks.
    pub fn period_ticks(&self) -> u64 {
        self.period_ticks
    }

    /// The logging session.
    pub fn logging(&self) -> &LoggingSession<S> {
        &self.logging
    }

    /// The register transport.
    pub fn registers(&self) -> &R {
        &self.registers
    }

    /// Mutable access to the register transport.
    pub fn registers_mut(&mut self) -> &mut R {
        &mut self.registers
    }

    /// Validate and write gains to one axis. Returns the gains as encoded.
    ///
    /// # Errors
    ///
    /// Returns `ServoError::Validation` for an unknown axis or out-of-range
    /// gains (nothing is written), or the register failure.
    pub fn apply_gains(&mut self, axis_index: usize, gains: GainSet) -> ServoResult<GainSet> {
        gains.validate()?;
        let axis = axis_at(&self.config.axes, axis_index)?;
        axis.write_gains(&mut self.registers, &gains)?;
        let applied = gains.quantized();
        if let Some(slot) = self.gains.get_mut(axis_index) {
            *slot = applied;
        }
        debug!(axis = %axis.name, gains = %applied, "gains applied");
        Ok(applied)
    }

    /// Validate and write the same gains to every axis.
    ///
    /// # Errors
    ///
    /// Returns `ServoError::Validation` for out-of-range gains (nothing is
    /// written), or the first register failure.
    pub fn apply_gains_all(&mut self, gains: GainSet) -> ServoResult<GainSet> {
        gains.validate()?;
        let applied = gains.quantized();
        for (axis, slot) in self.config.axes.iter().zip(self.gains.iter_mut()) {
            axis.write_gains(&mut self.registers, &gains)?;
            *slot = applied;
        }
        debug!(axes = self.config.axes.len(), gains = %applied, "gains applied to all axes");
        Ok(applied)
    }

    /// Read gains, desired and actual position of every axis.
    ///
    /// # Errors
    ///
    /// Returns the first register failure.
    pub fn status(&mut self) -> ServoResult<Vec<AxisStatus>> {
        let mut out = Vec::with_capacity(self.config.axes.len());
        for axis in &self.config.axes {
            out.push(axis.status(&mut self.registers)?);
        }
        Ok(out)
    }

    /// Zero gain and desired registers of every axis, forget stored gains and
    /// reset the log header state.
    ///
    /// # Errors
    ///
    /// Returns the first register failure, or a storage failure starting the
    /// fresh log file (registers are already zeroed in that case).
    pub fn reset(&mut self) -> ServoResult<()> {
        for axis in &self.config.axes {
            axis.reset(&mut self.registers)?;
        }
        self.gains.fill(GainSet::ZERO);
        self.logging.reset()?;
        info!(axes = self.config.axes.len(), "registers and logging reset");
        Ok(())
    }

    /// Flip sample logging and return the new state. Turning logging on
    /// starts a new file.
    ///
    /// # Errors
    ///
    /// Returns `ServoError::Storage` if the new file cannot be opened; logging
    /// stays off.
    pub fn toggle_logging(&mut self) -> ServoResult<bool> {
        let enabled = self.logging.toggle()?;
        info!(enabled, file = ?self.logging.current_file(), "logging toggled");
        Ok(enabled)
    }

    /// Read a raw register word by number (0 to 3).
    ///
    /// # Errors
    ///
    /// Returns `ServoError::Validation` for an unknown axis or register
    /// number, or the register failure.
    pub fn read_register(&mut self, axis_index: usize, register: u8) -> ServoResult<u32> {
        let index = RegisterIndex::new(register)?;
        let axis = axis_at(&self.config.axes, axis_index)?;
        Ok(axis.read_raw(&mut self.registers, index)?)
    }

    /// Write a raw register word by number (0 to 3), bypassing the gain
    /// codec. Stored gains are refreshed from hardware after a gain register
    /// write.
    ///
    /// # Errors
    ///
    /// Returns `ServoError::Validation` for an unknown axis or register
    /// number, or the register failure.
    pub fn write_register(&mut self, axis_index: usize, register: u8, value: u32) -> ServoResult<()> {
        let index = RegisterIndex::new(register)?;
        let axis = axis_at(&self.config.axes, axis_index)?;
        axis.write_raw(&mut self.registers, index, value)?;
        if matches!(index.offset(), RegisterOffset::KpKi | RegisterOffset::Kd) {
            let gains = axis.read_gains(&mut self.registers)?;
            if let Some(slot) = self.gains.get_mut(axis_index) {
                *slot = gains;
            }
        }
        debug!(axis = %axis.name, register, value = format_args!("{value:#010x}"), "raw register write");
        Ok(())
    }

    /// Run a forward-and-return motion: every axis moves from its current
    /// position to its target in `phase_ms`, then back.
    ///
    /// # Errors
    ///
    /// Returns `ServoError::Validation` if `targets` does not have one entry
    /// per axis, or the register failure reading the start positions. Once
    /// the motion is running, failures end up in the report instead.
    pub fn run_motion(&mut self, targets: &[Position]) -> ServoResult<MotionReport> {
        self.run_motion_inner(targets, None)
    }

    /// [`run_motion`](Self::run_motion) that also stops when `cancel` is set.
    ///
    /// # Errors
    ///
    /// See [`run_motion`](Self::run_motion).
    pub fn run_motion_with_cancel(
        &mut self,
        targets: &[Position],
        cancel: &AtomicBool,
    ) -> ServoResult<MotionReport> {
        self.run_motion_inner(targets, Some(cancel))
    }

    /// Step-response capture: write each target once, then sample every
    /// command period for `step_capture_ms`. With logging on, the capture
    /// goes to a new file.
    ///
    /// # Errors
    ///
    /// Returns `ServoError::Validation` if `targets` does not have one entry
    /// per axis, or the register failure writing the step.
    pub fn run_step_capture(&mut self, targets: &[Position]) -> ServoResult<MotionReport> {
        self.run_step_capture_inner(targets, None)
    }

    /// [`run_step_capture`](Self::run_step_capture) that also stops when
    /// `cancel` is set.
    ///
    /// # Errors
    ///
    /// See [`run_step_capture`](Self::run_step_capture).
    pub fn run_step_capture_with_cancel(
        &mut self,
        targets: &[Position],
        cancel: &AtomicBool,
    ) -> ServoResult<MotionReport> {
        self.run_step_capture_inner(targets, Some(cancel))
    }

    fn check_targets(&self, targets: &[Position]) -> Result<(), ValidationError> {
        if targets.len() != self.config.axes.len() {
            return Err(ValidationError::count_mismatch(
                "target",
                self.config.axes.len(),
                targets.len(),
            ));
        }
        Ok(())
    }

    fn run_motion_inner(
        &mut self,
        targets: &[Position],
        cancel: Option<&AtomicBool>,
    ) -> ServoResult<MotionReport> {
        self.check_targets(targets)?;
        let mut profiles = Vec::with_capacity(targets.len());
        for (axis, &target) in self.config.axes.iter().zip(targets) {
            let start = axis.read_actual(&mut self.registers)?;
            profiles.push(MotionProfile::forward_and_return(
                start,
                target,
                self.config.phase_ms,
            ));
        }
        info!(
            ?targets,
            phase_ms = self.config.phase_ms,
            "starting forward-and-return motion"
        );
        let planned_ms = self.config.motion_duration_ms();
        Ok(self.execute(MotionKind::Trajectory, &profiles, planned_ms, cancel))
    }

    fn run_step_capture_inner(
        &mut self,
        targets: &[Position],
        cancel: Option<&AtomicBool>,
    ) -> ServoResult<MotionReport> {
        self.check_targets(targets)?;
        for (axis, &target) in self.config.axes.iter().zip(targets) {
            axis.write_desired(&mut self.registers, target)?;
        }
        let planned_ms = self.config.step_capture_ms;
        let profiles: Vec<MotionProfile> = targets
            .iter()
            .map(|&target| MotionProfile::hold(target, planned_ms))
            .collect();
        info!(?targets, duration_ms = planned_ms, "starting step capture");
        Ok(self.execute(MotionKind::StepCapture, &profiles, planned_ms, cancel))
    }

    fn execute(
        &mut self,
        kind: MotionKind,
        profiles: &[MotionProfile],
        planned_ms: u64,
        cancel: Option<&AtomicBool>,
    ) -> MotionReport {
        let mut report = MotionReport::new(kind, planned_ms);
        let opened = match kind {
            MotionKind::StepCapture if self.logging.is_enabled() => {
                self.logging.start_file().map(|_| ())
            }
            _ => self.logging.begin_motion(),
        };
        if let Err(e) = opened {
            report.note_storage_error(e);
        }
        report.log_file = self.logging.current_file().map(str::to_string);

        let mut record = SampleRecord {
            gains: self.gains.first().copied().unwrap_or_default(),
            axes: vec![AxisSample::default(); self.config.axes.len()],
            ..SampleRecord::default()
        };
        let write_desired = kind == MotionKind::Trajectory;

        self.state = MotionState::Running;
        let start = self.clock.now();
        let mut gate = CommandGate::new(self.period_ticks);
        gate.arm(start);
        let mut previous_ms = 0;

        let outcome = loop {
            if cancel.is_some_and(|flag| flag.load(Ordering::Acquire)) {
                break MotionOutcome::Partial(PartialReason::Cancelled);
            }
            let now = self.clock.now();
            let elapsed_ms = self.clock.elapsed_ms(start, now);
            report.elapsed_ms = elapsed_ms;
            if elapsed_ms > planned_ms {
                break MotionOutcome::Complete;
            }
            if !gate.ready(now) {
                continue;
            }
            let interval = gate.mark(now);
            report.timing.record(interval, gate.period_ticks());

            if let Err(fault) = command_axes(
                &mut self.registers,
                &self.config.axes,
                profiles,
                write_desired,
                elapsed_ms,
                &mut record.axes,
            ) {
                error!(error = %fault, code = fault.code(), elapsed_ms, "register fault, motion stopped");
                break MotionOutcome::Partial(PartialReason::RegisterFault(fault));
            }

            record.elapsed_ms = elapsed_ms;
            record.delta_ms = elapsed_ms.saturating_sub(previous_ms);
            previous_ms = elapsed_ms;
            report.samples = report.samples.saturating_add(1);
            trace!(elapsed_ms, interval, "sample");

            if let Err(e) = self.logging.record(&record) {
                report.note_storage_error(e);
            }
        };

        if let Err(e) = self.logging.finish_motion() {
            report.note_storage_error(e);
        }
        report.outcome = outcome;
        self.state = MotionState::Done(outcome);
        info!(
            %outcome,
            samples = report.samples,
            late_commands = report.timing.late_commands,
            max_interval_ticks = report.timing.max_interval_ticks,
            "motion finished"
        );
        report
    }
}
