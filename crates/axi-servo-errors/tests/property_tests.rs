//! Property-based tests for error invariants.

use axi_servo_errors::{ErrorSeverity, RegisterError, ServoError};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_register_error_keeps_base(base in any::<u32>(), offset in 0u32..16) {
        let errors = [
            RegisterError::WriteFailed { base, offset },
            RegisterError::ReadFailed { base, offset },
            RegisterError::Unresponsive { base },
        ];
        for err in errors {
            prop_assert_eq!(err.base(), base);
            let wrapped: ServoError = err.into();
            prop_assert_eq!(wrapped.severity(), ErrorSeverity::Critical);
        }
    }
}
