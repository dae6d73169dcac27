//! Objective compliance: generic robustness scoring plus bespoke checks.

pub mod checks;
pub mod evaluator;
pub mod robustness;
pub mod types;

pub use evaluator::{ComplianceEvaluator, EvaluationOutcome};
pub use robustness::{required_robustness, DeclaredEvidenceScorer, RobustnessScorer};
pub use types::*;
