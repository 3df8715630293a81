//! Gain, status, reset, logging toggle and raw register operations.

use axi_servo_driver::prelude::*;
use axi_servo_errors::ValidationError;
use axi_servo_logging::MemoryLogSink;
use axi_servo_registers::RegisterOffset;
use axi_servo_test_helpers::prelude::*;

const PAN: u32 = 0x43C0_0000;
const TILT: u32 = 0x43C1_0000;

type Driver = ControlLoopDriver<RecordingRegisters, SteppingTicks, MemoryLogSink>;

fn driver() -> Driver {
    let config = must(
        DriverConfig::builder()
            .counter_hz(10_000)
            .command_hz(1_000)
            .phase_ms(2)
            .axes(Vec::new())
            .axis("pan", PAN)
            .axis("tilt", TILT)
            .build(),
    );
    must(ControlLoopDriver::new(
        RecordingRegisters::new([PAN, TILT]),
        SteppingTicks::new(0, 1),
        MemoryLogSink::new(),
        config,
    ))
}

fn reference_gains() -> GainSet {
    must(GainSet::new(10.5, 2.0, 0.75))
}

#[test]
fn apply_gains_writes_packed_words() -> TestResult {
    let mut driver = driver();

    let applied = driver.apply_gains(1, reference_gains())?;

    assert_eq!(applied, reference_gains());
    let bank = driver.registers().bank();
    assert_eq!(bank.peek(TILT, RegisterOffset::KpKi), Some(0x0200_0A80));
    assert_eq!(bank.peek(TILT, RegisterOffset::Kd), Some(192));
    assert_eq!(bank.peek(PAN, RegisterOffset::KpKi), Some(0));
    assert_eq!(driver.gains(), &[GainSet::ZERO, reference_gains()]);
    Ok(())
}

#[test]
fn applied_gains_are_quantized() -> TestResult {
    let mut driver = driver();

    let applied = driver.apply_gains_all(GainSet::new(1.999, 0.0, 0.001)?)?;

    // 1.999 * 256 truncates to 511, 0.001 * 256 to 0.
    assert_eq!(applied.to_string(), "Kp=1.996 Ki=0.000 Kd=0.000");
    assert_eq!(driver.gains(), &[applied, applied]);
    Ok(())
}

#[test]
fn invalid_gains_write_nothing() {
    let mut driver = driver();
    let bad = GainSet {
        kp: -1.0,
        ki: 0.0,
        kd: 0.0,
    };

    assert!(matches!(
        driver.apply_gains(0, bad),
        Err(ServoError::Validation(ValidationError::OutOfRange { .. }))
    ));
    assert!(matches!(
        driver.apply_gains_all(GainSet { kd: f32::NAN, ..GainSet::ZERO }),
        Err(ServoError::Validation(ValidationError::NotFinite { .. }))
    ));
    assert!(driver.registers().writes().is_empty());
}

#[test]
fn unknown_axis_is_rejected() {
    let mut driver = driver();

    let result = driver.apply_gains(2, reference_gains());

    assert!(matches!(
        result,
        Err(ServoError::Validation(ValidationError::OutOfRange { ref field, .. })) if field == "axis index"
    ));
    assert!(driver.registers().writes().is_empty());
}

#[test]
fn status_reports_register_contents() -> TestResult {
    let mut driver = driver();
    driver.apply_gains(0, reference_gains())?;
    driver.registers_mut().bank_mut().set_actual(PAN, 940)?;
    driver.write_register(0, 3, 1_000)?;

    let status = driver.status()?;

    assert_eq!(status.len(), 2);
    let lines: Vec<String> = status.iter().map(ToString::to_string).collect();
    insta::assert_snapshot!(lines.join("\n"), @r"
    pan: Kp=10.500 Ki=2.000 Kd=0.750 desired=1000 actual=940 error=60
    tilt: Kp=0.000 Ki=0.000 Kd=0.000 desired=0 actual=0 error=0
    ");
    Ok(())
}

#[test]
fn reset_zeroes_gains_and_desired_but_not_actual() -> TestResult {
    let mut driver = driver();
    driver.apply_gains_all(reference_gains())?;
    driver.run_motion(&[400, 400])?;
    driver.write_register(1, 3, 77)?;
    driver.registers_mut().bank_mut().set_actual(TILT, 55)?;

    driver.reset()?;

    let bank = driver.registers().bank();
    for base in [PAN, TILT] {
        assert_eq!(bank.peek(base, RegisterOffset::KpKi), Some(0));
        assert_eq!(bank.peek(base, RegisterOffset::Kd), Some(0));
        assert_eq!(bank.peek(base, RegisterOffset::Desired), Some(0));
    }
    assert_eq!(bank.peek(TILT, RegisterOffset::Actual), Some(55));
    assert_eq!(driver.gains(), &[GainSet::ZERO, GainSet::ZERO]);
    assert_eq!(driver.logging().current_file(), Some("LOG02.CSV"));
    Ok(())
}

#[test]
fn reset_then_motion_writes_a_fresh_header() -> TestResult {
    let mut driver = driver();
    driver.run_motion(&[10, 10])?;
    driver.reset()?;

    let report = driver.run_motion(&[10, 10])?;

    assert_eq!(report.log_file.as_deref(), Some("LOG02.CSV"));
    let lines = driver.logging().sink().lines("LOG02.CSV").unwrap_or_default();
    assert_eq!(lines.len(), 1 + 4);
    assert!(lines.first().is_some_and(|h| h.starts_with("Time_ms,Delta_ms")));
    Ok(())
}

#[test]
fn toggle_logging_switches_files() -> TestResult {
    let mut driver = driver();
    driver.run_motion(&[10, 10])?;

    assert!(!driver.toggle_logging()?);
    let quiet = driver.run_motion(&[10, 10])?;
    assert_eq!(quiet.log_file, None);

    assert!(driver.toggle_logging()?);
    let loud = driver.run_motion(&[10, 10])?;
    assert_eq!(loud.log_file.as_deref(), Some("LOG02.CSV"));
    assert_eq!(driver.logging().sink().file_names(), vec!["LOG01.CSV", "LOG02.CSV"]);
    assert_eq!(
        driver.logging().sink().lines("LOG01.CSV").map(<[String]>::len),
        Some(1 + 4)
    );
    let second = driver.logging().sink().lines("LOG02.CSV").unwrap_or_default();
    assert_eq!(second.len(), 1 + 4);
    assert!(second.first().is_some_and(|h| h.starts_with("Time_ms,Delta_ms")));
    assert_eq!(second.iter().filter(|l| l.starts_with("Time_ms")).count(), 1);
    Ok(())
}

#[test]
fn raw_register_access_by_number() -> TestResult {
    let mut driver = driver();

    driver.write_register(0, 3, (-5i32).cast_unsigned())?;
    assert_eq!(driver.read_register(0, 3)?, 0xFFFF_FFFB);

    // A raw gain word bypasses the codec but stored gains follow hardware.
    driver.write_register(0, 0, 0x0100_0200)?;
    assert_eq!(driver.read_register(0, 0)?, 0x0100_0200);
    assert_eq!(
        driver.gains().first().map(ToString::to_string).as_deref(),
        Some("Kp=2.000 Ki=1.000 Kd=0.000")
    );

    assert!(matches!(
        driver.read_register(0, 4),
        Err(ServoError::Validation(ValidationError::OutOfRange { .. }))
    ));
    assert!(matches!(
        driver.write_register(9, 0, 1),
        Err(ServoError::Validation(_))
    ));
    Ok(())
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let config = DriverConfig {
        command_hz: 0,
        ..DriverConfig::default()
    };

    let result = ControlLoopDriver::new(
        RecordingRegisters::new([PAN]),
        SteppingTicks::new(0, 1),
        MemoryLogSink::new(),
        config,
    );

    assert!(matches!(result, Err(ServoError::Config(_))));
}

#[test]
fn default_config_uses_global_timer_rate() -> TestResult {
    let driver = ControlLoopDriver::new(
        RecordingRegisters::new([PAN, TILT]),
        SteppingTicks::new(0, 1),
        MemoryLogSink::new(),
        DriverConfig::default(),
    )?;

    assert_eq!(driver.period_ticks(), 333_333_343 / 5_000);
    assert_eq!(driver.axes().len(), 2);
    assert_eq!(driver.state(), MotionState::Idle);
    assert!(format!("{driver:?}").starts_with("ControlLoopDriver"));
    Ok(())
}
