//! Snapshot tests for error message formatting.
//!
//! Operators read these strings on the console, so they must stay stable.

use axi_servo_errors::{RegisterError, ServoError, StorageError, ValidationError};
use insta::assert_snapshot;

#[test]
fn test_gain_out_of_range() {
    let err = ValidationError::out_of_range("Ki", -0.5, 0.0, 127.996);
    assert_snapshot!(err.to_string(), @"Ki value -0.5 is out of range [0, 127.996]");
}

#[test]
fn test_register_index_out_of_range() {
    let err = ValidationError::out_of_range("register index", 7, 0, 3);
    assert_snapshot!(err.to_string(), @"register index value 7 is out of range [0, 3]");
}

#[test]
fn test_write_failed() {
    let err = RegisterError::WriteFailed {
        base: 0x43C1_0000,
        offset: 0x0C,
    };
    assert_snapshot!(err.to_string(), @"Register write failed at 0x43c10000+0x0c");
}

#[test]
fn test_wrapped_storage_error() {
    let err: ServoError = StorageError::open_failed("LOG03.CSV", "disk full").into();
    assert_snapshot!(
        err.to_string(),
        @"Storage error: Storage unavailable: cannot open LOG03.CSV: disk full"
    );
}
