//! EventDispatcher: synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::AssessmentEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// When no handlers are registered, `emit` iterates over an empty Vec.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn AssessmentEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn AssessmentEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// Handlers that panic are caught and do not prevent subsequent handlers
    /// from receiving the event.
    fn emit<F: Fn(&dyn AssessmentEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("event handler panicked; continuing with remaining handlers");
            }
        }
    }

    // ---- Assessment Lifecycle ----
    pub fn emit_assessment_started(&self, event: &AssessmentStartedEvent) {
        self.emit(|h| h.on_assessment_started(event));
    }

    pub fn emit_assessment_completed(&self, event: &AssessmentCompletedEvent) {
        self.emit(|h| h.on_assessment_completed(event));
    }

    pub fn emit_assessment_rejected(&self, event: &AssessmentRejectedEvent) {
        self.emit(|h| h.on_assessment_rejected(event));
    }

    // ---- Objectives ----
    pub fn emit_objective_evaluated(&self, event: &ObjectiveEvaluatedEvent) {
        self.emit(|h| h.on_objective_evaluated(event));
    }

    // ---- Mitigations ----
    pub fn emit_mitigation_validated(&self, event: &MitigationValidatedEvent) {
        self.emit(|h| h.on_mitigation_validated(event));
    }

    // ---- Adjustment ----
    pub fn emit_penalty_applied(&self, event: &PenaltyAppliedEvent) {
        self.emit(|h| h.on_penalty_applied(event));
    }

    // ---- Errors ----
    pub fn emit_error(&self, event: &ErrorEvent) {
        self.emit(|h| h.on_error(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
