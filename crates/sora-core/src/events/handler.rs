//! AssessmentEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for handling assessment events.
///
/// All methods have no-op default implementations, so handlers only need
/// to override the events they care about. The trait requires `Send + Sync`
/// because objective evaluations run on worker threads.
pub trait AssessmentEventHandler: Send + Sync {
    // ---- Assessment Lifecycle ----
    fn on_assessment_started(&self, _event: &AssessmentStartedEvent) {}
    fn on_assessment_completed(&self, _event: &AssessmentCompletedEvent) {}
    fn on_assessment_rejected(&self, _event: &AssessmentRejectedEvent) {}

    // ---- Objectives ----
    fn on_objective_evaluated(&self, _event: &ObjectiveEvaluatedEvent) {}

    // ---- Mitigations ----
    fn on_mitigation_validated(&self, _event: &MitigationValidatedEvent) {}

    // ---- Adjustment ----
    fn on_penalty_applied(&self, _event: &PenaltyAppliedEvent) {}

    // ---- Errors ----
    fn on_error(&self, _event: &ErrorEvent) {}
}
