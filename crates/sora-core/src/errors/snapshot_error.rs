//! Operation snapshot validation errors.

use super::error_code::{self, SoraErrorCode};

/// A numeric field of the snapshot is outside its physical domain.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    #[error("Field {field} = {value} must be a finite, non-negative number")]
    NegativeOrNonFinite { field: String, value: f64 },

    #[error("Field {field} = {value} is not finite")]
    NonFinite { field: String, value: f64 },

    #[error("Field {field} = {value} must lie in [0, 1]")]
    OutOfUnitRange { field: String, value: f64 },
}

impl SoraErrorCode for SnapshotError {
    fn error_code(&self) -> &'static str {
        error_code::INVALID_SNAPSHOT
    }
}
