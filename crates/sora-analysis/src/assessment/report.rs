//! Aggregation of outcomes into score, penalties, recommendations and summary.

use sora_core::types::RuleRevision;

use super::types::AssessmentResult;
use crate::catalog::rules_for;
use crate::compliance::{ObjectiveOutcome, ObjectiveStatus};
use crate::mitigation::MitigationOutcome;

/// Weighted average of objective scores using catalog weights.
///
/// A satisfied objective scores 1, a failed one its confidence. Objectives
/// that could not be evaluated are left out.
pub fn weighted_score(outcomes: &[ObjectiveOutcome], revision: RuleRevision) -> f64 {
    let rules = rules_for(revision);
    let mut total_weight = 0.0;
    let mut weighted_sum = 0.0;

    for outcome in outcomes {
        if outcome.status == ObjectiveStatus::NotImplemented {
            continue;
        }
        let weight = rules
            .entry(outcome.objective_id)
            .map(|e| e.weight)
            .unwrap_or(1.0);
        let score = if outcome.is_satisfied() {
            1.0
        } else {
            outcome.confidence
        };
        weighted_sum += score * weight;
        total_weight += weight;
    }

    if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    }
}

/// One line per penalised objective.
pub fn penalty_descriptions(outcomes: &[ObjectiveOutcome]) -> Vec<String> {
    outcomes
        .iter()
        .filter(|o| o.penalty_applied)
        .map(|o| {
            let reason = match o.status {
                ObjectiveStatus::Errored => "evaluation failed",
                _ => "non-compliant",
            };
            format!(
                "{} ({}): {reason} without an accepted tactical mitigation",
                o.objective_id, o.title
            )
        })
        .collect()
}

pub fn recommendations(
    outcomes: &[ObjectiveOutcome],
    mitigation_outcomes: &[MitigationOutcome],
    revision: RuleRevision,
    acceptance_reliability: f64,
) -> Vec<String> {
    let rules = rules_for(revision);
    let mut recommendations = Vec::new();

    for outcome in outcomes {
        match outcome.status {
            ObjectiveStatus::NotImplemented => recommendations.push(format!(
                "{}: no evaluator available; demonstrate compliance to the authority directly",
                outcome.objective_id
            )),
            ObjectiveStatus::Errored => recommendations.push(format!(
                "{}: evaluation failed; review the declared evidence and re-run the assessment",
                outcome.objective_id
            )),
            ObjectiveStatus::NonCompliant if outcome.mitigated_by.is_none() => {
                if outcome.missing_evidence.is_empty() {
                    recommendations.push(format!(
                        "{}: raise robustness to at least {:.2} ({})",
                        outcome.objective_id, outcome.required_robustness, outcome.title
                    ));
                } else {
                    recommendations.push(format!(
                        "{}: provide {}",
                        outcome.objective_id,
                        outcome.missing_evidence.join("; ")
                    ));
                }
                let substitutable = rules
                    .entry(outcome.objective_id)
                    .is_some_and(|e| e.has_tmpr);
                if substitutable {
                    recommendations.push(format!(
                        "{}: alternatively declare a validated tactical mitigation with reliability >= {:.2}",
                        outcome.objective_id, acceptance_reliability
                    ));
                }
            }
            _ => {}
        }
    }

    for mitigation in mitigation_outcomes.iter().filter(|m| !m.compliant) {
        recommendations.push(format!(
            "Mitigation {} not validated at {}: {}",
            mitigation.path,
            mitigation.arc,
            mitigation.failures.join("; ")
        ));
    }

    recommendations
}

pub fn summary(result: &AssessmentResult) -> String {
    let satisfied = result.outcomes.iter().filter(|o| o.is_satisfied()).count();
    let mitigated = result
        .outcomes
        .iter()
        .filter(|o| !o.compliant && o.mitigated_by.is_some())
        .count();
    format!(
        "{} assessment of '{}': {}/{} objectives satisfied ({} by tactical mitigation), \
         {} penalt{}, {} -> {}, {} -> {}, weighted score {:.2}: {}",
        result.revision.edition(),
        result.operation_id,
        satisfied,
        result.outcomes.len(),
        mitigated,
        result.penalty_count,
        if result.penalty_count == 1 { "y" } else { "ies" },
        result.residual_arc,
        result.adjusted_arc,
        result.target_sail,
        result.recalculated_sail,
        result.weighted_score,
        if result.compliant { "COMPLIANT" } else { "NON-COMPLIANT" },
    )
}
