//! Event payload types for assessment lifecycle events.

use crate::types::{AirRiskClass, ObjectiveId, RuleRevision, Sail};

/// Payload for `on_assessment_started`.
#[derive(Debug, Clone)]
pub struct AssessmentStartedEvent {
    pub operation_id: String,
    pub revision: RuleRevision,
    pub target_sail: Sail,
    pub objective_count: usize,
}

/// Payload for `on_objective_evaluated`.
#[derive(Debug, Clone)]
pub struct ObjectiveEvaluatedEvent {
    pub operation_id: String,
    pub objective_id: ObjectiveId,
    pub status: String,
    pub compliant: bool,
    pub confidence: f64,
}

/// Payload for `on_mitigation_validated`.
#[derive(Debug, Clone)]
pub struct MitigationValidatedEvent {
    pub operation_id: String,
    pub path: String,
    pub arc: AirRiskClass,
    pub compliant: bool,
    pub measured_ratio: Option<f64>,
}

/// Payload for `on_penalty_applied`.
#[derive(Debug, Clone)]
pub struct PenaltyAppliedEvent {
    pub operation_id: String,
    pub penalty_count: usize,
    pub original_arc: AirRiskClass,
    pub adjusted_arc: AirRiskClass,
}

/// Payload for `on_assessment_completed`.
#[derive(Debug, Clone)]
pub struct AssessmentCompletedEvent {
    pub operation_id: String,
    pub compliant: bool,
    pub recalculated_sail: Sail,
    pub penalty_count: usize,
    pub duration_ms: u64,
}

/// Payload for `on_assessment_rejected`.
#[derive(Debug, Clone)]
pub struct AssessmentRejectedEvent {
    pub operation_id: String,
    pub error_code: String,
    pub message: String,
}

/// Payload for `on_error`.
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub message: String,
    pub error_code: String,
}
