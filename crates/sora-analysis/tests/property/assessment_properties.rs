use std::sync::Arc;

use proptest::prelude::*;
use sora_analysis::risk::RiskMitigationEngine;
use sora_analysis::tier::resolve;
use sora_analysis::AssessmentOrchestrator;
use sora_core::traits::UnavailableRiskRatioCatalog;
use sora_core::types::{
    AirRiskClass, CrewEvidence, DeclaredStrategy, ObjectiveEvidence, ObjectiveId, Operation,
    RobustnessLevel, RuleRevision, StrategyKind,
};

fn arc() -> impl Strategy<Value = AirRiskClass> {
    prop_oneof![
        Just(AirRiskClass::A),
        Just(AirRiskClass::B),
        Just(AirRiskClass::C),
        Just(AirRiskClass::D),
    ]
}

fn revision() -> impl Strategy<Value = RuleRevision> {
    prop_oneof![Just(RuleRevision::V1), Just(RuleRevision::V2)]
}

fn strategy() -> impl Strategy<Value = DeclaredStrategy> {
    let kind = prop_oneof![
        Just(StrategyKind::GroundStrategic),
        Just(StrategyKind::GroundImpactReduction),
        Just(StrategyKind::EmergencyResponsePlan),
        Just(StrategyKind::AirOperationalRestriction),
        Just(StrategyKind::AirCommonStructure),
    ];
    let robustness = prop_oneof![
        Just(RobustnessLevel::Low),
        Just(RobustnessLevel::Medium),
        Just(RobustnessLevel::High),
    ];
    (kind, robustness).prop_map(|(kind, robustness)| DeclaredStrategy { kind, robustness })
}

fn operation(grc: u8, initial_arc: AirRiskClass, strategies: Vec<DeclaredStrategy>) -> Operation {
    Operation {
        operation_id: "prop".to_string(),
        intrinsic_grc: grc,
        initial_arc,
        strategies,
        ..Default::default()
    }
}

proptest! {
    #[test]
    fn reduction_stays_in_bounds(
        grc in 1u8..=7,
        initial in arc(),
        strategies in prop::collection::vec(strategy(), 0..8),
        rev in revision(),
    ) {
        let engine = RiskMitigationEngine::default();
        let result = engine.reduce(&operation(grc, initial, strategies), rev).unwrap();
        prop_assert!((1..=grc).contains(&result.final_grc));
        prop_assert!(result.residual_arc <= initial);
        if initial != AirRiskClass::A {
            prop_assert!(result.residual_arc >= AirRiskClass::B);
        }
        prop_assert!(result.ground_reduction <= 0.9 && result.air_reduction <= 0.9);
    }

    #[test]
    fn more_strategies_never_raise_grc(
        grc in 1u8..=7,
        strategies in prop::collection::vec(strategy(), 0..6),
        extra in strategy(),
        rev in revision(),
    ) {
        let engine = RiskMitigationEngine::default();
        let base = engine
            .reduce(&operation(grc, AirRiskClass::C, strategies.clone()), rev)
            .unwrap();
        let mut more = strategies;
        more.push(extra);
        let reduced = engine.reduce(&operation(grc, AirRiskClass::C, more), rev).unwrap();
        prop_assert!(reduced.final_grc <= base.final_grc);
        prop_assert!(reduced.residual_arc <= base.residual_arc);
    }

    #[test]
    fn penalties_only_lower_the_arc(initial in arc(), a in 0usize..6, b in 0usize..6) {
        let (few, many) = (a.min(b), a.max(b));
        let lower = RiskMitigationEngine::apply_adjustment(initial, many);
        let higher = RiskMitigationEngine::apply_adjustment(initial, few);
        prop_assert!(lower <= higher);
        prop_assert!(higher <= initial);
    }

    #[test]
    fn sail_is_monotonic(g1 in 1u8..=7, g2 in 1u8..=7, a1 in arc(), a2 in arc()) {
        let (g_lo, g_hi) = (g1.min(g2), g1.max(g2));
        let (a_lo, a_hi) = (a1.min(a2), a1.max(a2));
        prop_assert!(resolve(g_lo, a_lo).unwrap() <= resolve(g_hi, a_hi).unwrap());
    }

    #[test]
    fn penalty_count_matches_outcomes(
        grc in 1u8..=7,
        initial in arc(),
        rev in revision(),
        integrity in 0.0f64..=1.0,
        assurance in 0.0f64..=1.0,
        ground_crew in 0u32..3,
    ) {
        let mut op = operation(grc, initial, Vec::new());
        op.crew = CrewEvidence { trained_ground_crew: ground_crew, ..Default::default() };
        for n in 1..=24 {
            op.objective_evidence.insert(
                ObjectiveId::new(n).unwrap(),
                ObjectiveEvidence {
                    integrity: Some(integrity),
                    assurance: Some(assurance),
                    ..Default::default()
                },
            );
        }
        let orchestrator = AssessmentOrchestrator::new(Arc::new(UnavailableRiskRatioCatalog));
        let result = orchestrator.assess(&op, rev, None).unwrap();

        let penalised = result.outcomes.iter().filter(|o| o.penalty_applied).count();
        prop_assert_eq!(result.penalty_count, penalised);
        prop_assert_eq!(result.adjusted_arc, result.residual_arc.step_down(penalised));
        prop_assert!(result.recalculated_sail <= result.target_sail);
        prop_assert!((0.0..=1.0).contains(&result.weighted_score));
        if penalised > 0 {
            prop_assert!(!result.compliant);
        }
    }
}
