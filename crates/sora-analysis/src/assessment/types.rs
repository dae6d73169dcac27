//! Assessment result, the aggregate root of a run.

use serde::{Deserialize, Serialize};

use sora_core::types::{AirRiskClass, ObjectiveId, RuleRevision, Sail};

use crate::compliance::{ObjectiveOutcome, ObjectiveStatus};
use crate::mitigation::MitigationOutcome;

/// Complete, revision-tagged result of one assessment.
///
/// Outcomes are sorted by objective id and mitigation outcomes by path, and
/// nothing time-dependent is recorded, so identical inputs serialize to
/// identical JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub revision: RuleRevision,
    pub operation_id: String,
    pub intrinsic_grc: u8,
    pub final_grc: u8,
    /// Air risk class as declared.
    pub original_arc: AirRiskClass,
    /// After strategic air mitigation.
    pub residual_arc: AirRiskClass,
    /// After the penalty adjustment.
    pub adjusted_arc: AirRiskClass,
    pub target_sail: Sail,
    pub recalculated_sail: Sail,
    pub outcomes: Vec<ObjectiveOutcome>,
    pub mitigation_outcomes: Vec<MitigationOutcome>,
    pub penalty_count: usize,
    pub penalties: Vec<String>,
    /// Weighted objective score in [0, 1].
    pub weighted_score: f64,
    pub compliant: bool,
    pub notes: Vec<String>,
    pub recommendations: Vec<String>,
    pub summary: String,
}

impl AssessmentResult {
    pub fn outcome(&self, objective: ObjectiveId) -> Option<&ObjectiveOutcome> {
        self.outcomes.iter().find(|o| o.objective_id == objective)
    }

    pub fn count_status(&self, status: ObjectiveStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
