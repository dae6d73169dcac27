//! Per-objective compliance evaluation.

use std::sync::Arc;

use sora_core::config::SoraConfig;
use sora_core::errors::CatalogError;
use sora_core::types::{AirRiskClass, FxHashMap, ObjectiveId, Operation, RuleRevision, Sail};

use super::checks::{
    AdjacentAreaCheck, CrewPerformanceCheck, DetectAndAvoidCheck, OperationalVolumeCheck,
};
use super::robustness::{
    meets_threshold, required_robustness, DeclaredEvidenceScorer, RobustnessScorer,
};
use super::types::{CheckContext, ObjectiveCheck, ObjectiveOutcome, RobustnessScore};
use crate::catalog::{self, CheckKind};

/// Explicit result of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationOutcome {
    Evaluated(ObjectiveOutcome),
    NotImplemented(ObjectiveId),
}

/// Scores objectives with the configured robustness strategy and the
/// bespoke checks the rule revision binds.
///
/// Pure: reads the operation snapshot and the static catalog only.
pub struct ComplianceEvaluator {
    scorer: Arc<dyn RobustnessScorer>,
    checks: FxHashMap<CheckKind, Arc<dyn ObjectiveCheck>>,
}

impl ComplianceEvaluator {
    /// Evaluator with the declared-evidence scorer and all built-in checks.
    pub fn new(config: &SoraConfig) -> Self {
        let mut checks: FxHashMap<CheckKind, Arc<dyn ObjectiveCheck>> = FxHashMap::default();
        checks.insert(CheckKind::DetectAndAvoid, Arc::new(DetectAndAvoidCheck));
        checks.insert(
            CheckKind::OperationalVolume,
            Arc::new(OperationalVolumeCheck::from_config(config)),
        );
        checks.insert(CheckKind::CrewPerformance, Arc::new(CrewPerformanceCheck));
        checks.insert(
            CheckKind::AdjacentArea,
            Arc::new(AdjacentAreaCheck::from_config(config)),
        );
        Self {
            scorer: Arc::new(DeclaredEvidenceScorer),
            checks,
        }
    }

    /// Replace the robustness scoring strategy.
    pub fn with_scorer(mut self, scorer: Arc<dyn RobustnessScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Register or replace a bespoke check under its own kind.
    pub fn with_check(mut self, check: Arc<dyn ObjectiveCheck>) -> Self {
        self.checks.insert(check.kind(), check);
        self
    }

    pub fn scorer_name(&self) -> &'static str {
        self.scorer.name()
    }

    /// Evaluate one objective at the given air risk class and SAIL.
    ///
    /// Fails only when the objective is not part of the revision. Declared
    /// scores outside [0, 1] produce an errored outcome.
    pub fn evaluate(
        &self,
        objective: ObjectiveId,
        operation: &Operation,
        arc: AirRiskClass,
        sail: Sail,
        revision: RuleRevision,
    ) -> Result<EvaluationOutcome, CatalogError> {
        let rules = catalog::rules_for(revision);
        let entry = catalog::entry(objective, revision)?;
        let evidence = operation.evidence_for(objective);
        if let Some(Err(e)) = evidence.map(|ev| ev.validate(objective)) {
            tracing::warn!(objective = %objective, error = %e, "invalid objective evidence");
            return Ok(EvaluationOutcome::Evaluated(ObjectiveOutcome::errored(
                entry,
                e.to_string(),
            )));
        }
        let required = required_robustness(sail);
        let score = self.scorer.score(objective, evidence);
        let check = rules
            .check_for(objective)
            .and_then(|kind| self.checks.get(&kind));

        let outcome = match (check, score) {
            (Some(check), score) => {
                let ctx = CheckContext {
                    objective,
                    operation,
                    arc,
                    sail,
                    revision,
                };
                let result = check.evaluate(&ctx);
                let score = score.unwrap_or_default();
                let mut outcome = ObjectiveOutcome::scored(
                    entry,
                    result.compliant,
                    result.confidence,
                    &score,
                    required,
                );
                outcome.missing_evidence = result.missing_evidence;
                outcome.messages = result.messages;
                outcome.details = result.details;
                tracing::debug!(
                    objective = %objective,
                    check = check.name(),
                    compliant = outcome.compliant,
                    confidence = outcome.confidence,
                    "bespoke check evaluated"
                );
                outcome
            }
            (None, Some(score)) => Self::generic(entry, score, required),
            (None, None) => {
                tracing::debug!(
                    objective = %objective,
                    scorer = self.scorer.name(),
                    "no evaluator available"
                );
                return Ok(EvaluationOutcome::NotImplemented(objective));
            }
        };

        Ok(EvaluationOutcome::Evaluated(outcome))
    }

    fn generic(
        entry: &catalog::RequirementEntry,
        score: RobustnessScore,
        required: f64,
    ) -> ObjectiveOutcome {
        let robustness = score.robustness();
        let compliant = meets_threshold(robustness, required);
        let mut outcome = ObjectiveOutcome::scored(entry, compliant, robustness, &score, required);
        outcome.messages.push(format!(
            "Robustness {robustness:.3} (integrity {:.2} x assurance {:.2}) {} required {required:.2}",
            score.integrity,
            score.assurance,
            if compliant { "meets" } else { "below" },
        ));
        outcome.missing_evidence = score.missing_evidence;
        tracing::debug!(
            objective = %entry.id,
            robustness,
            required,
            compliant,
            "robustness evaluated"
        );
        outcome
    }
}

impl Default for ComplianceEvaluator {
    fn default() -> Self {
        Self::new(&SoraConfig::default())
    }
}

impl std::fmt::Debug for ComplianceEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&CheckKind> = self.checks.keys().collect();
        kinds.sort();
        f.debug_struct("ComplianceEvaluator")
            .field("scorer", &self.scorer.name())
            .field("checks", &kinds)
            .finish()
    }
}
