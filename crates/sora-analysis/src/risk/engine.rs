//! Strategic risk reduction and the penalty adjustment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sora_core::config::SoraConfig;
use sora_core::constants::MAX_TOTAL_REDUCTION;
use sora_core::errors::TierError;
use sora_core::types::{
    AirRiskClass, MitigationSystem, Operation, RobustnessLevel, RuleRevision, StrategyKind,
};

use super::factors::base_factor;
use crate::catalog::rules_for;
use crate::compliance::ObjectiveOutcome;
use crate::mitigation::MitigationOutcome;

/// Absorbs float noise before rounding up.
const CEIL_EPSILON: f64 = 1e-9;

/// Strategy credited by `reduce`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedStrategy {
    pub kind: StrategyKind,
    pub robustness: RobustnessLevel,
    pub factor: f64,
}

/// Output of strategic reduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMitigationResult {
    pub revision: RuleRevision,
    pub intrinsic_grc: u8,
    pub final_grc: u8,
    /// Summed ground factors after the cap.
    pub ground_reduction: f64,
    pub initial_arc: AirRiskClass,
    pub residual_arc: AirRiskClass,
    /// Summed air factors after the cap.
    pub air_reduction: f64,
    pub applied: Vec<AppliedStrategy>,
    pub notes: Vec<String>,
}

/// Applies declared strategies and the penalty adjustment.
#[derive(Debug, Clone)]
pub struct RiskMitigationEngine {
    acceptance_reliability: f64,
}

impl RiskMitigationEngine {
    pub fn new(acceptance_reliability: f64) -> Self {
        Self {
            acceptance_reliability,
        }
    }

    pub fn from_config(config: &SoraConfig) -> Self {
        Self::new(config.mitigation.effective_acceptance_reliability())
    }

    pub fn acceptance_reliability(&self) -> f64 {
        self.acceptance_reliability
    }

    /// Reduce ground and air risk with the operation's declared strategies.
    ///
    /// Each strategy kind counts once, at its highest declared robustness.
    /// `final = initial x (1 - sum)` with the sum capped; the final GRC is
    /// rounded up and kept within `1..=initial`. The residual ARC never
    /// drops below ARC-b through strategic means unless it started at ARC-a.
    pub fn reduce(
        &self,
        operation: &Operation,
        revision: RuleRevision,
    ) -> Result<RiskMitigationResult, TierError> {
        let intrinsic = operation.intrinsic_grc;
        if !(1..=7).contains(&intrinsic) {
            return Err(TierError::GroundRiskOutOfRange { value: intrinsic });
        }

        let rules = rules_for(revision);
        let mut notes = Vec::new();

        let mut strongest: BTreeMap<StrategyKind, RobustnessLevel> = BTreeMap::new();
        for strategy in &operation.strategies {
            let slot = strongest.entry(strategy.kind).or_insert(strategy.robustness);
            if *slot != strategy.robustness {
                notes.push(format!(
                    "Strategy {} declared more than once; highest robustness counted",
                    strategy.kind.as_str()
                ));
                *slot = (*slot).max(strategy.robustness);
            }
        }

        let mut applied = Vec::new();
        for (&kind, &robustness) in &strongest {
            match rules.strategy_scale(kind, robustness) {
                Some(scale) => applied.push(AppliedStrategy {
                    kind,
                    robustness,
                    factor: base_factor(kind, robustness) * scale,
                }),
                None => notes.push(format!(
                    "Strategy {} earns no reduction under {}",
                    kind.as_str(),
                    revision.edition()
                )),
            }
        }

        let ground_reduction = capped_sum(applied.iter().filter(|a| a.kind.is_ground()));
        let air_reduction = capped_sum(applied.iter().filter(|a| !a.kind.is_ground()));

        let final_value = f64::from(intrinsic) * (1.0 - ground_reduction);
        let final_grc = (ceil(final_value) as u8).clamp(1, intrinsic);

        let initial_arc = operation.initial_arc;
        let residual_arc = if initial_arc == AirRiskClass::A {
            initial_arc
        } else {
            let value = f64::from(initial_arc.ordinal()) * (1.0 - air_reduction);
            let ordinal =
                (ceil(value) as u8).clamp(AirRiskClass::B.ordinal(), initial_arc.ordinal());
            AirRiskClass::from_ordinal(ordinal)?
        };

        tracing::debug!(
            intrinsic_grc = intrinsic,
            final_grc,
            initial_arc = %initial_arc,
            residual_arc = %residual_arc,
            ground_reduction,
            air_reduction,
            "strategic reduction applied"
        );

        Ok(RiskMitigationResult {
            revision,
            intrinsic_grc: intrinsic,
            final_grc,
            ground_reduction,
            initial_arc,
            residual_arc,
            air_reduction,
            applied,
            notes,
        })
    }

    /// Lower `arc` by one class per penalty, floored at ARC-a.
    pub fn apply_adjustment(arc: AirRiskClass, penalties: usize) -> AirRiskClass {
        arc.step_down(penalties)
    }

    /// A tactical mitigation is accepted when it is active, reliable enough
    /// and validated against the risk-ratio threshold.
    pub fn accepts(&self, system: &MitigationSystem, validation: &MitigationOutcome) -> bool {
        system.active
            && system.reliability >= self.acceptance_reliability
            && validation.path == system.path()
            && validation.compliant
    }

    /// Failed objectives without an accepted mitigation are penalties.
    /// Objectives nobody could evaluate are not.
    pub fn is_penalty(outcome: &ObjectiveOutcome, accepted_mitigation: bool) -> bool {
        outcome.status.is_failure() && !accepted_mitigation
    }
}

impl Default for RiskMitigationEngine {
    fn default() -> Self {
        Self::from_config(&SoraConfig::default())
    }
}

fn capped_sum<'a>(strategies: impl Iterator<Item = &'a AppliedStrategy>) -> f64 {
    strategies
        .map(|a| a.factor)
        .sum::<f64>()
        .clamp(0.0, MAX_TOTAL_REDUCTION)
}

fn ceil(value: f64) -> f64 {
    (value - CEIL_EPSILON).ceil()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sora_core::types::DeclaredStrategy;

    fn operation(
        grc: u8,
        arc: AirRiskClass,
        strategies: &[(StrategyKind, RobustnessLevel)],
    ) -> Operation {
        Operation {
            intrinsic_grc: grc,
            initial_arc: arc,
            strategies: strategies
                .iter()
                .map(|&(kind, robustness)| DeclaredStrategy { kind, robustness })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn no_strategies_keep_inputs() {
        let result = RiskMitigationEngine::default()
            .reduce(&operation(5, AirRiskClass::C, &[]), RuleRevision::V2)
            .unwrap();
        assert_eq!(result.final_grc, 5);
        assert_eq!(result.residual_arc, AirRiskClass::C);
    }

    #[test]
    fn ground_reduction_rounds_up() {
        // 5 x (1 - 0.30 - 0.15) = 2.75 -> 3
        let op = operation(
            5,
            AirRiskClass::B,
            &[
                (StrategyKind::GroundStrategic, RobustnessLevel::High),
                (StrategyKind::GroundImpactReduction, RobustnessLevel::Medium),
            ],
        );
        let result = RiskMitigationEngine::default().reduce(&op, RuleRevision::V1).unwrap();
        assert_eq!(result.final_grc, 3);
    }

    #[test]
    fn exact_products_do_not_round_up() {
        // 5 x (1 - 0.20) = 4 exactly in decimal
        let op = operation(
            5,
            AirRiskClass::B,
            &[(StrategyKind::GroundStrategic, RobustnessLevel::Medium)],
        );
        let result = RiskMitigationEngine::default().reduce(&op, RuleRevision::V1).unwrap();
        assert_eq!(result.final_grc, 4);
    }

    #[test]
    fn final_grc_never_below_one() {
        let op = operation(
            1,
            AirRiskClass::B,
            &[
                (StrategyKind::GroundStrategic, RobustnessLevel::High),
                (StrategyKind::GroundImpactReduction, RobustnessLevel::High),
                (StrategyKind::EmergencyResponsePlan, RobustnessLevel::High),
            ],
        );
        let result = RiskMitigationEngine::default().reduce(&op, RuleRevision::V1).unwrap();
        assert_eq!(result.final_grc, 1);
    }

    #[test]
    fn v2_ignores_emergency_response_plan() {
        let op = operation(
            4,
            AirRiskClass::B,
            &[(StrategyKind::EmergencyResponsePlan, RobustnessLevel::High)],
        );
        let v1 = RiskMitigationEngine::default().reduce(&op, RuleRevision::V1).unwrap();
        let v2 = RiskMitigationEngine::default().reduce(&op, RuleRevision::V2).unwrap();
        assert_eq!(v1.applied.len(), 1);
        assert!(v2.applied.is_empty());
        assert_eq!(v2.notes.len(), 1);
        assert_eq!(v2.final_grc, 4);
    }

    #[test]
    fn residual_arc_floors_at_b() {
        let op = operation(
            3,
            AirRiskClass::D,
            &[
                (StrategyKind::AirOperationalRestriction, RobustnessLevel::High),
                (StrategyKind::AirCommonStructure, RobustnessLevel::High),
            ],
        );
        // 4 x (1 - 0.5) = 2 -> ARC-b
        let result = RiskMitigationEngine::default().reduce(&op, RuleRevision::V2).unwrap();
        assert_eq!(result.residual_arc, AirRiskClass::B);
    }

    #[test]
    fn duplicate_strategy_counts_once() {
        let op = operation(
            6,
            AirRiskClass::B,
            &[
                (StrategyKind::GroundStrategic, RobustnessLevel::Low),
                (StrategyKind::GroundStrategic, RobustnessLevel::High),
            ],
        );
        let result = RiskMitigationEngine::default().reduce(&op, RuleRevision::V1).unwrap();
        assert_eq!(result.applied.len(), 1);
        assert_eq!(result.applied[0].robustness, RobustnessLevel::High);
    }

    #[test]
    fn out_of_range_grc_is_rejected() {
        for grc in [0, 8] {
            let err = RiskMitigationEngine::default()
                .reduce(&operation(grc, AirRiskClass::B, &[]), RuleRevision::V2)
                .unwrap_err();
            assert_eq!(err, TierError::GroundRiskOutOfRange { value: grc });
        }
    }
}
