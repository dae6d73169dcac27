//! Per-objective evaluation errors.

use super::error_code::{self, SoraErrorCode};

/// Errors raised while scoring a single objective. These never abort an
/// assessment: the orchestrator turns them into an errored outcome.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("Evaluator for {objective} panicked: {message}")]
    Panicked { objective: String, message: String },

    #[error("Invalid evidence for {objective}: {message}")]
    InvalidEvidence { objective: String, message: String },
}

impl SoraErrorCode for EvaluationError {
    fn error_code(&self) -> &'static str {
        error_code::EVALUATION_ERROR
    }
}
