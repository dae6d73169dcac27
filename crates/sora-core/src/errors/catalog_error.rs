//! Requirement catalog errors.

use super::error_code::{self, SoraErrorCode};

/// Errors raised while resolving revisions, objectives, and crosswalks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Unsupported rule revision: {0}")]
    UnsupportedRevision(String),

    #[error("Objective {objective} is not defined under revision {revision}")]
    UnknownObjective { objective: String, revision: String },

    #[error("Invalid objective id: {0}")]
    InvalidObjectiveId(String),

    #[error("Unsupported crosswalk direction: {from} -> {to}")]
    UnsupportedCrosswalk { from: String, to: String },
}

impl SoraErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedRevision(_) => error_code::UNSUPPORTED_REVISION,
            Self::UnknownObjective { .. } => error_code::UNKNOWN_OBJECTIVE,
            Self::InvalidObjectiveId(_) => error_code::INVALID_OBJECTIVE_ID,
            Self::UnsupportedCrosswalk { .. } => error_code::UNSUPPORTED_CROSSWALK,
        }
    }
}
