//! Core types for objective compliance.

use serde::{Deserialize, Serialize};

use sora_core::traits::MitigationPath;
use sora_core::types::{AirRiskClass, ObjectiveId, Operation, RuleRevision, Sail, SmallVec4};

use crate::catalog::{CheckKind, RequirementEntry};

/// Objective evaluation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectiveStatus {
    Compliant,
    NonCompliant,
    /// No evaluator could score the objective.
    NotImplemented,
    /// The evaluator failed; recorded as non-compliant.
    Errored,
}

impl ObjectiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::NonCompliant => "non-compliant",
            Self::NotImplemented => "not-implemented",
            Self::Errored => "errored",
        }
    }

    /// Evaluated and found wanting. Eligible for mitigation and penalty.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::NonCompliant | Self::Errored)
    }
}

/// Result produced for each objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveOutcome {
    pub objective_id: ObjectiveId,
    pub title: String,
    pub status: ObjectiveStatus,
    pub compliant: bool,
    /// Confidence in [0, 1].
    pub confidence: f64,
    pub integrity: f64,
    pub assurance: f64,
    pub robustness: f64,
    pub required_robustness: f64,
    pub penalty_applied: bool,
    /// Accepted tactical mitigation standing in for a failed objective.
    pub mitigated_by: Option<MitigationPath>,
    pub missing_evidence: SmallVec4<String>,
    pub messages: Vec<String>,
    pub details: serde_json::Value,
}

impl ObjectiveOutcome {
    fn base(entry: &RequirementEntry, status: ObjectiveStatus) -> Self {
        Self {
            objective_id: entry.id,
            title: entry.title.to_string(),
            status,
            compliant: status == ObjectiveStatus::Compliant,
            confidence: 0.0,
            integrity: 0.0,
            assurance: 0.0,
            robustness: 0.0,
            required_robustness: 0.0,
            penalty_applied: false,
            mitigated_by: None,
            missing_evidence: SmallVec4::new(),
            messages: Vec::new(),
            details: serde_json::Value::Null,
        }
    }

    /// Outcome of a scored evaluation.
    pub fn scored(
        entry: &RequirementEntry,
        compliant: bool,
        confidence: f64,
        score: &RobustnessScore,
        required_robustness: f64,
    ) -> Self {
        let status = if compliant {
            ObjectiveStatus::Compliant
        } else {
            ObjectiveStatus::NonCompliant
        };
        Self {
            confidence: confidence.clamp(0.0, 1.0),
            integrity: score.integrity,
            assurance: score.assurance,
            robustness: score.robustness(),
            required_robustness,
            ..Self::base(entry, status)
        }
    }

    /// No evaluator is registered for the objective.
    pub fn not_implemented(entry: &RequirementEntry) -> Self {
        let mut outcome = Self::base(entry, ObjectiveStatus::NotImplemented);
        outcome
            .messages
            .push(format!("No evaluator available for {}", entry.id));
        outcome
    }

    /// The evaluator failed while scoring the objective.
    pub fn errored(entry: &RequirementEntry, error: String) -> Self {
        let mut outcome = Self::base(entry, ObjectiveStatus::Errored);
        outcome.messages.push(error);
        outcome
    }

    /// Compliant on its own or covered by an accepted tactical mitigation.
    pub fn is_satisfied(&self) -> bool {
        self.compliant || self.mitigated_by.is_some()
    }
}

/// Integrity and assurance scores for one objective.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RobustnessScore {
    pub integrity: f64,
    pub assurance: f64,
    pub missing_evidence: SmallVec4<String>,
}

impl RobustnessScore {
    /// Scores clamped into [0, 1].
    pub fn new(integrity: f64, assurance: f64) -> Self {
        Self {
            integrity: integrity.clamp(0.0, 1.0),
            assurance: assurance.clamp(0.0, 1.0),
            missing_evidence: SmallVec4::new(),
        }
    }

    pub fn robustness(&self) -> f64 {
        self.integrity * self.assurance
    }
}

/// Result of a bespoke check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub compliant: bool,
    pub confidence: f64,
    pub missing_evidence: SmallVec4<String>,
    pub messages: Vec<String>,
    pub details: serde_json::Value,
}

impl CheckResult {
    pub fn pass(confidence: f64, message: String) -> Self {
        Self {
            compliant: true,
            confidence,
            missing_evidence: SmallVec4::new(),
            messages: vec![message],
            details: serde_json::Value::Null,
        }
    }

    pub fn fail(
        confidence: f64,
        message: String,
        missing_evidence: impl Into<SmallVec4<String>>,
    ) -> Self {
        Self {
            compliant: false,
            confidence,
            missing_evidence: missing_evidence.into(),
            messages: vec![message],
            details: serde_json::Value::Null,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }
}

/// Input provided to each bespoke check.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    pub objective: ObjectiveId,
    pub operation: &'a Operation,
    pub arc: AirRiskClass,
    pub sail: Sail,
    pub revision: RuleRevision,
}

/// Trait for bespoke objective checks.
pub trait ObjectiveCheck: Send + Sync {
    fn kind(&self) -> CheckKind;
    fn name(&self) -> &'static str;
    fn evaluate(&self, ctx: &CheckContext<'_>) -> CheckResult;
}
