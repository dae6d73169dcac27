//! Risk class and SAIL range errors.

use super::error_code::{self, SoraErrorCode};

/// Errors raised for out-of-range tier inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TierError {
    #[error("Ground risk class {value} outside 1..=7")]
    GroundRiskOutOfRange { value: u8 },

    #[error("Air risk ordinal {ordinal} outside 1..=4")]
    AirRiskOutOfRange { ordinal: u8 },

    #[error("Unknown air risk class: {0}")]
    UnknownAirRiskClass(String),

    #[error("SAIL ordinal {ordinal} outside 1..=6")]
    SailOutOfRange { ordinal: u8 },
}

impl SoraErrorCode for TierError {
    fn error_code(&self) -> &'static str {
        error_code::TIER_OUT_OF_RANGE
    }
}
