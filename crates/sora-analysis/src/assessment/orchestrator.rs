//! Assessment orchestrator: validation, reduction, scatter-gather evaluation
//! and a single adjustment pass.

use std::collections::{BTreeMap, BTreeSet};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use sora_core::config::SoraConfig;
use sora_core::errors::{AssessmentError, ConfigError, EvaluationError, SoraErrorCode};
use sora_core::events::types::{
    AssessmentCompletedEvent, AssessmentRejectedEvent, AssessmentStartedEvent, ErrorEvent,
    MitigationValidatedEvent, ObjectiveEvaluatedEvent, PenaltyAppliedEvent,
};
use sora_core::events::EventDispatcher;
use sora_core::traits::{
    Cancellable, CancellationToken, MitigationPath, OperationProvider, RiskRatioCatalog,
};
use sora_core::types::{AirRiskClass, ObjectiveId, Operation, RuleRevision, Sail};

use super::report;
use super::types::AssessmentResult;
use crate::catalog;
use crate::compliance::{
    ComplianceEvaluator, EvaluationOutcome, ObjectiveCheck, ObjectiveOutcome, RobustnessScorer,
};
use crate::mitigation::{MitigationOutcome, MitigationValidator};
use crate::risk::RiskMitigationEngine;
use crate::tier;

/// Everything one objective task produces.
struct ObjectiveReport {
    outcome: ObjectiveOutcome,
    mitigations: Vec<MitigationOutcome>,
}

/// Drives an assessment run.
///
/// Phases, each a barrier:
/// 1. structural validation, strategic reduction, target SAIL, objective set
/// 2. per-objective evaluation on the rayon pool, with tactical mitigation
///    validation for failed objectives, then a sweep over the remaining
///    claimed mitigations
/// 3. penalty count, one adjustment of the ARC, SAIL re-resolution and the
///    overall verdict
///
/// Runs are stateless; one orchestrator can serve concurrent callers.
pub struct AssessmentOrchestrator {
    config: SoraConfig,
    evaluator: ComplianceEvaluator,
    validator: MitigationValidator,
    engine: RiskMitigationEngine,
    dispatcher: EventDispatcher,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl AssessmentOrchestrator {
    /// Orchestrator with default configuration on the global rayon pool.
    pub fn new(catalog: Arc<dyn RiskRatioCatalog>) -> Self {
        Self::build(SoraConfig::default(), catalog, None)
    }

    /// Orchestrator from a resolved configuration. A non-zero
    /// `assessment.threads` gets a dedicated pool.
    pub fn with_config(
        config: SoraConfig,
        catalog: Arc<dyn RiskRatioCatalog>,
    ) -> Result<Self, AssessmentError> {
        SoraConfig::validate(&config)?;
        let threads = config.assessment.effective_threads();
        let pool = if threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("sora-assess-{i}"))
                .build()
                .map_err(|e| ConfigError::ValidationFailed {
                    field: "assessment.threads".to_string(),
                    message: e.to_string(),
                })?;
            Some(Arc::new(pool))
        } else {
            None
        };
        Ok(Self::build(config, catalog, pool))
    }

    fn build(
        config: SoraConfig,
        catalog: Arc<dyn RiskRatioCatalog>,
        pool: Option<Arc<rayon::ThreadPool>>,
    ) -> Self {
        Self {
            evaluator: ComplianceEvaluator::new(&config),
            validator: MitigationValidator::from_config(catalog, &config),
            engine: RiskMitigationEngine::from_config(&config),
            dispatcher: EventDispatcher::new(),
            pool,
            config,
        }
    }

    /// Replace the robustness scoring strategy.
    pub fn with_scorer(mut self, scorer: Arc<dyn RobustnessScorer>) -> Self {
        self.evaluator = self.evaluator.with_scorer(scorer);
        self
    }

    /// Register or replace a bespoke objective check.
    pub fn with_check(mut self, check: Arc<dyn ObjectiveCheck>) -> Self {
        self.evaluator = self.evaluator.with_check(check);
        self
    }

    pub fn with_dispatcher(mut self, dispatcher: EventDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn config(&self) -> &SoraConfig {
        &self.config
    }

    /// Assess `operation` under `revision`, optionally restricted to an
    /// explicit objective subset. An empty subset means "use the catalog".
    pub fn assess(
        &self,
        operation: &Operation,
        revision: RuleRevision,
        subset: Option<&[ObjectiveId]>,
    ) -> Result<AssessmentResult, AssessmentError> {
        self.assess_with_cancellation(operation, revision, subset, &CancellationToken::new())
    }

    /// `assess` with the revision and objective ids given as strings.
    pub fn assess_str(
        &self,
        operation: &Operation,
        revision: &str,
        subset: Option<&[&str]>,
    ) -> Result<AssessmentResult, AssessmentError> {
        match parse_request(revision, subset) {
            Ok((revision, subset)) => self.assess(operation, revision, subset.as_deref()),
            Err(e) => {
                self.reject(&operation.operation_id, &e);
                Err(e)
            }
        }
    }

    /// Fetch the snapshot for `mission_id` and assess it, under the
    /// configured default revision unless one is given.
    pub fn assess_mission(
        &self,
        provider: &dyn OperationProvider,
        mission_id: &str,
        revision: Option<RuleRevision>,
        subset: Option<&[ObjectiveId]>,
    ) -> Result<AssessmentResult, AssessmentError> {
        let operation = provider.snapshot(mission_id).map_err(|e| {
            let e = AssessmentError::from(e);
            self.reject(mission_id, &e);
            e
        })?;
        let revision = revision.unwrap_or_else(|| self.config.default_revision());
        self.assess(&operation, revision, subset)
    }

    /// Assess with cooperative cancellation. A cancelled run returns
    /// `AssessmentError::Cancelled` and no partial result.
    pub fn assess_with_cancellation(
        &self,
        operation: &Operation,
        revision: RuleRevision,
        subset: Option<&[ObjectiveId]>,
        token: &CancellationToken,
    ) -> Result<AssessmentResult, AssessmentError> {
        let span = tracing::info_span!(
            "assessment",
            operation_id = %operation.operation_id,
            revision = %revision
        );
        let _guard = span.enter();
        let start = Instant::now();

        let result = self.run(operation, revision, subset, token);
        match &result {
            Ok(result) => {
                let duration_ms = start.elapsed().as_millis() as u64;
                tracing::info!(
                    compliant = result.compliant,
                    penalties = result.penalty_count,
                    target_sail = %result.target_sail,
                    recalculated_sail = %result.recalculated_sail,
                    duration_ms,
                    "assessment complete"
                );
                self.dispatcher
                    .emit_assessment_completed(&AssessmentCompletedEvent {
                        operation_id: operation.operation_id.clone(),
                        compliant: result.compliant,
                        recalculated_sail: result.recalculated_sail,
                        penalty_count: result.penalty_count,
                        duration_ms,
                    });
            }
            Err(e) => self.reject(&operation.operation_id, e),
        }
        result
    }

    fn run(
        &self,
        operation: &Operation,
        revision: RuleRevision,
        subset: Option<&[ObjectiveId]>,
        token: &CancellationToken,
    ) -> Result<AssessmentResult, AssessmentError> {
        // Phase 1: validation and requirement resolution.
        if operation.declared_revision != revision {
            tracing::warn!(
                declared = %operation.declared_revision,
                requested = %revision,
                "declared revision differs; assessing under the requested revision"
            );
        }
        let subset: Option<BTreeSet<ObjectiveId>> = match subset {
            Some(ids) if !ids.is_empty() => {
                catalog::validate_subset(ids, revision)?;
                Some(ids.iter().copied().collect())
            }
            _ => None,
        };

        operation.validate()?;
        let reduction = self.engine.reduce(operation, revision)?;
        let arc = reduction.residual_arc;
        let target_sail = tier::resolve(reduction.final_grc, arc)?;
        let objectives: Vec<ObjectiveId> = match subset {
            Some(ids) => ids.into_iter().collect(),
            None => catalog::objectives_for(target_sail, revision)?,
        };

        if token.is_cancelled() {
            return Err(AssessmentError::Cancelled);
        }

        tracing::info!(
            final_grc = reduction.final_grc,
            residual_arc = %arc,
            target_sail = %target_sail,
            objectives = objectives.len(),
            "requirements resolved"
        );
        self.dispatcher.emit_assessment_started(&AssessmentStartedEvent {
            operation_id: operation.operation_id.clone(),
            revision,
            target_sail,
            objective_count: objectives.len(),
        });

        // Phase 2: scatter-gather.
        let reports: Vec<ObjectiveReport> = self.install(|| {
            objectives
                .par_iter()
                .map(|&objective| {
                    self.evaluate_objective(objective, operation, arc, target_sail, revision, token)
                })
                .collect::<Result<Vec<_>, _>>()
        })?;

        let validated: BTreeSet<MitigationPath> = reports
            .iter()
            .flat_map(|r| r.mitigations.iter().map(|m| m.path))
            .collect();
        let remaining: Vec<MitigationPath> = operation
            .active_mitigations()
            .map(|m| m.path())
            .filter(|p| !validated.contains(p))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let swept: Vec<MitigationOutcome> = self.install(|| {
            remaining
                .par_iter()
                .map(|&path| {
                    if token.is_cancelled() {
                        return Err(AssessmentError::Cancelled);
                    }
                    Ok(self.validate_mitigation(operation, path, arc))
                })
                .collect::<Result<Vec<_>, _>>()
        })?;

        if token.is_cancelled() {
            return Err(AssessmentError::Cancelled);
        }

        // Phase 3: adjustment and re-resolution.
        let mut outcomes = Vec::with_capacity(reports.len());
        let mut by_path: BTreeMap<MitigationPath, MitigationOutcome> = BTreeMap::new();
        for report in reports {
            outcomes.push(report.outcome);
            for m in report.mitigations {
                by_path.entry(m.path).or_insert(m);
            }
        }
        for m in swept {
            by_path.entry(m.path).or_insert(m);
        }
        outcomes.sort_by_key(|o| o.objective_id);
        let mitigation_outcomes: Vec<MitigationOutcome> = by_path.into_values().collect();

        let penalty_count = outcomes.iter().filter(|o| o.penalty_applied).count();
        let adjusted_arc = RiskMitigationEngine::apply_adjustment(arc, penalty_count);
        if penalty_count > 0 {
            tracing::info!(penalty_count, from = %arc, to = %adjusted_arc, "penalties applied");
            self.dispatcher.emit_penalty_applied(&PenaltyAppliedEvent {
                operation_id: operation.operation_id.clone(),
                penalty_count,
                original_arc: arc,
                adjusted_arc,
            });
        }
        let recalculated_sail = tier::resolve(reduction.final_grc, adjusted_arc)?;

        let compliant = outcomes.iter().all(|o| o.is_satisfied())
            && mitigation_outcomes.iter().all(|m| m.compliant);

        let acceptance = self.engine.acceptance_reliability();
        let mut result = AssessmentResult {
            revision,
            operation_id: operation.operation_id.clone(),
            intrinsic_grc: reduction.intrinsic_grc,
            final_grc: reduction.final_grc,
            original_arc: reduction.initial_arc,
            residual_arc: arc,
            adjusted_arc,
            target_sail,
            recalculated_sail,
            weighted_score: report::weighted_score(&outcomes, revision),
            penalties: report::penalty_descriptions(&outcomes),
            recommendations: report::recommendations(
                &outcomes,
                &mitigation_outcomes,
                revision,
                acceptance,
            ),
            outcomes,
            mitigation_outcomes,
            penalty_count,
            compliant,
            notes: reduction.notes,
            summary: String::new(),
        };
        result.summary = report::summary(&result);
        Ok(result)
    }

    fn evaluate_objective(
        &self,
        objective: ObjectiveId,
        operation: &Operation,
        arc: AirRiskClass,
        sail: Sail,
        revision: RuleRevision,
        token: &CancellationToken,
    ) -> Result<ObjectiveReport, AssessmentError> {
        if token.is_cancelled() {
            return Err(AssessmentError::Cancelled);
        }
        let entry = catalog::entry(objective, revision)?;

        let evaluated = catch_unwind(AssertUnwindSafe(|| {
            self.evaluator
                .evaluate(objective, operation, arc, sail, revision)
        }));
        let mut outcome = match evaluated {
            Ok(Ok(EvaluationOutcome::Evaluated(outcome))) => outcome,
            Ok(Ok(EvaluationOutcome::NotImplemented(_))) => {
                ObjectiveOutcome::not_implemented(entry)
            }
            Ok(Err(e)) => ObjectiveOutcome::errored(entry, e.to_string()),
            Err(payload) => {
                let error = EvaluationError::Panicked {
                    objective: objective.to_string(),
                    message: panic_message(payload.as_ref()),
                };
                tracing::warn!(
                    objective = %objective,
                    error = %error,
                    "objective evaluation failed"
                );
                self.dispatcher.emit_error(&ErrorEvent {
                    message: error.to_string(),
                    error_code: error.error_code().to_string(),
                });
                ObjectiveOutcome::errored(entry, error.to_string())
            }
        };

        let mut mitigations = Vec::new();
        if outcome.status.is_failure() && entry.has_tmpr {
            for system in operation.mitigations_for(objective) {
                if token.is_cancelled() {
                    return Err(AssessmentError::Cancelled);
                }
                let validation = self.validate_mitigation(operation, system.path(), arc);
                if outcome.mitigated_by.is_none() && self.engine.accepts(system, &validation) {
                    outcome.mitigated_by = Some(system.path());
                    outcome
                        .messages
                        .push(format!("Substituted by tactical mitigation {}", system.path()));
                }
                mitigations.push(validation);
            }
        }
        outcome.penalty_applied =
            RiskMitigationEngine::is_penalty(&outcome, outcome.mitigated_by.is_some());

        tracing::debug!(
            objective = %objective,
            status = outcome.status.as_str(),
            penalty = outcome.penalty_applied,
            "objective evaluated"
        );
        self.dispatcher
            .emit_objective_evaluated(&ObjectiveEvaluatedEvent {
                operation_id: operation.operation_id.clone(),
                objective_id: objective,
                status: outcome.status.as_str().to_string(),
                compliant: outcome.compliant,
                confidence: outcome.confidence,
            });

        Ok(ObjectiveReport {
            outcome,
            mitigations,
        })
    }

    fn validate_mitigation(
        &self,
        operation: &Operation,
        path: MitigationPath,
        arc: AirRiskClass,
    ) -> MitigationOutcome {
        let outcome = self.validator.validate(path, arc);
        self.dispatcher
            .emit_mitigation_validated(&MitigationValidatedEvent {
                operation_id: operation.operation_id.clone(),
                path: path.to_string(),
                arc,
                compliant: outcome.compliant,
                measured_ratio: outcome.measured_ratio,
            });
        outcome
    }

    fn reject(&self, operation_id: &str, error: &AssessmentError) {
        tracing::warn!(error = %error, "assessment rejected");
        self.dispatcher
            .emit_assessment_rejected(&AssessmentRejectedEvent {
                operation_id: operation_id.to_string(),
                error_code: error.error_code().to_string(),
                message: error.to_string(),
            });
    }

    fn install<R: Send>(&self, f: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }
}

impl std::fmt::Debug for AssessmentOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentOrchestrator")
            .field("evaluator", &self.evaluator)
            .field("validator", &self.validator)
            .field("engine", &self.engine)
            .field("dispatcher", &self.dispatcher)
            .field("dedicated_pool", &self.pool.is_some())
            .finish()
    }
}

type ParsedRequest = (RuleRevision, Option<Vec<ObjectiveId>>);

fn parse_request(
    revision: &str,
    subset: Option<&[&str]>,
) -> Result<ParsedRequest, AssessmentError> {
    let revision: RuleRevision = revision.parse()?;
    let subset = match subset {
        Some(ids) => Some(
            ids.iter()
                .map(|id| id.parse::<ObjectiveId>())
                .collect::<Result<Vec<_>, _>>()?,
        ),
        None => None,
    };
    Ok((revision, subset))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
