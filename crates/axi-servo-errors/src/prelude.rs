//! Prelude module for convenient error handling imports.

pub use crate::{
    RegisterResult, ServoResult, StorageResult,
    common::{ErrorCategory, ErrorSeverity, ResultExt, ServoError},
    register::RegisterError,
    storage::StorageError,
    validation::ValidationError,
};
