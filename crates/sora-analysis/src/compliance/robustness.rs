//! Robustness scoring: integrity x assurance against a SAIL threshold.

use sora_core::constants::{ROBUSTNESS_HIGH, ROBUSTNESS_LOW, ROBUSTNESS_MEDIUM};
use sora_core::types::{ObjectiveEvidence, ObjectiveId, Sail};

use super::types::RobustnessScore;

/// Minimum robustness required at `sail`.
pub fn required_robustness(sail: Sail) -> f64 {
    match sail {
        Sail::I | Sail::II => ROBUSTNESS_LOW,
        Sail::III | Sail::IV => ROBUSTNESS_MEDIUM,
        Sail::V | Sail::VI => ROBUSTNESS_HIGH,
    }
}

/// Equality is compliant.
pub fn meets_threshold(robustness: f64, required: f64) -> bool {
    robustness >= required
}

/// Strategy turning declared evidence into integrity and assurance scores.
///
/// Returning `None` means the scorer cannot assess the objective at all;
/// the evaluator reports it as not implemented rather than failed.
pub trait RobustnessScorer: Send + Sync {
    fn name(&self) -> &'static str;

    fn score(
        &self,
        objective: ObjectiveId,
        evidence: Option<&ObjectiveEvidence>,
    ) -> Option<RobustnessScore>;
}

/// Uses the integrity and assurance values declared with the evidence.
/// Undeclared or non-finite values score 0 and are listed as missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredEvidenceScorer;

impl RobustnessScorer for DeclaredEvidenceScorer {
    fn name(&self) -> &'static str {
        "declared-evidence"
    }

    fn score(
        &self,
        objective: ObjectiveId,
        evidence: Option<&ObjectiveEvidence>,
    ) -> Option<RobustnessScore> {
        let Some(evidence) = evidence else {
            let mut score = RobustnessScore::default();
            score
                .missing_evidence
                .push(format!("{objective}: no technical or procedural evidence declared"));
            return Some(score);
        };

        let mut missing = Vec::new();
        let integrity = declared(evidence.integrity).unwrap_or_else(|| {
            missing.push(format!("{objective}: integrity score (technical evidence)"));
            0.0
        });
        let assurance = declared(evidence.assurance).unwrap_or_else(|| {
            missing.push(format!("{objective}: assurance score (procedural evidence)"));
            0.0
        });

        let mut score = RobustnessScore::new(integrity, assurance);
        score.missing_evidence = missing.into();
        Some(score)
    }
}

fn declared(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
