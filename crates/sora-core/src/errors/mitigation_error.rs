//! Mitigation-system catalog errors.

use super::error_code::{self, SoraErrorCode};

/// Errors from the external risk-ratio catalog. All of them map to
/// "mitigation not validated"; none is retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MitigationError {
    #[error("Risk ratio lookup for {path} timed out after {timeout_ms}ms")]
    Timeout { path: String, timeout_ms: u64 },

    #[error("Risk ratio unavailable for {path}: {message}")]
    Unavailable { path: String, message: String },

    #[error("Risk ratio {ratio} for {path} is not a ratio in [0, 1]")]
    InvalidRatio { path: String, ratio: f64 },
}

impl SoraErrorCode for MitigationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => error_code::MITIGATION_TIMEOUT,
            Self::Unavailable { .. } | Self::InvalidRatio { .. } => {
                error_code::MITIGATION_UNAVAILABLE
            }
        }
    }
}
