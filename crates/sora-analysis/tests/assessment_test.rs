//! End-to-end assessment runs: verdicts, penalties, rejection, isolation,
//! cancellation and determinism.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use sora_analysis::catalog::CheckKind;
use sora_analysis::compliance::{
    CheckContext, CheckResult, ObjectiveCheck, ObjectiveStatus, RobustnessScore, RobustnessScorer,
};
use sora_analysis::AssessmentOrchestrator;
use sora_core::config::SoraConfig;
use sora_core::errors::{
    AssessmentError, CatalogError, MitigationError, ProviderError, SnapshotError, TierError,
};
use sora_core::events::types::{
    AssessmentCompletedEvent, AssessmentRejectedEvent, AssessmentStartedEvent,
    ObjectiveEvaluatedEvent, PenaltyAppliedEvent,
};
use sora_core::events::{AssessmentEventHandler, EventDispatcher};
use sora_core::traits::{
    Cancellable, CancellationToken, InMemoryOperationProvider, MitigationPath, RiskRatioCatalog,
    StaticRiskRatioCatalog, UnavailableRiskRatioCatalog,
};
use sora_core::types::{
    Aerodrome, AirRiskClass, CertificationType, CrewEvidence, FlightEvidence, MitigationKind,
    MitigationSystem, ObjectiveEvidence, ObjectiveId, Operation, OperationalVolume, RuleRevision,
    Sail,
};

const SAIL_II_V2: [u8; 11] = [1, 3, 6, 7, 8, 9, 13, 16, 17, 20, 23];

fn oso(n: u8) -> ObjectiveId {
    ObjectiveId::new(n).unwrap()
}

/// GRC 2 at ARC-b under v2 resolves to SAIL II, and every objective of that
/// set is satisfied by the declared evidence.
fn make_operation() -> Operation {
    let objective_evidence = SAIL_II_V2
        .iter()
        .map(|&n| {
            (
                oso(n),
                ObjectiveEvidence {
                    integrity: Some(0.8),
                    assurance: Some(0.8),
                    technical: vec![format!("test-report-{n}")],
                    procedural: vec![format!("manual-{n}")],
                },
            )
        })
        .collect();

    Operation {
        operation_id: "op-survey-7".to_string(),
        mission_id: "mission-7".to_string(),
        declared_revision: RuleRevision::V2,
        intrinsic_grc: 2,
        initial_arc: AirRiskClass::B,
        flight: FlightEvidence {
            path_length_m: 2_000.0,
            flight_duration_min: 20.0,
            waypoints: 3,
            containment_buffer_m: Some(250.0),
            airspace_analysis: true,
            atc_coordination: false,
            in_controlled_airspace: false,
            ..Default::default()
        },
        crew: CrewEvidence {
            pilot_certification: CertificationType::Advanced,
            pilot_flight_hours: 150.0,
            recurrent_training_current: true,
            trained_ground_crew: 2,
            trained_visual_observers: 0,
        },
        volume: Some(OperationalVolume {
            x_min_m: 0.0,
            x_max_m: 1_000.0,
            y_min_m: 0.0,
            y_max_m: 1_000.0,
            alt_min_m: 0.0,
            alt_max_m: 100.0,
            ceiling_m: 120.0,
        }),
        objective_evidence,
        ..Default::default()
    }
}

fn make_orchestrator() -> AssessmentOrchestrator {
    AssessmentOrchestrator::new(Arc::new(UnavailableRiskRatioCatalog))
}

#[derive(Default)]
struct RecordingHandler {
    started: AtomicUsize,
    completed: AtomicUsize,
    rejected: AtomicUsize,
    objectives: AtomicUsize,
    penalties: AtomicUsize,
}

impl AssessmentEventHandler for RecordingHandler {
    fn on_assessment_started(&self, _event: &AssessmentStartedEvent) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }
    fn on_assessment_completed(&self, _event: &AssessmentCompletedEvent) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }
    fn on_assessment_rejected(&self, _event: &AssessmentRejectedEvent) {
        self.rejected.fetch_add(1, Ordering::SeqCst);
    }
    fn on_objective_evaluated(&self, _event: &ObjectiveEvaluatedEvent) {
        self.objectives.fetch_add(1, Ordering::SeqCst);
    }
    fn on_penalty_applied(&self, event: &PenaltyAppliedEvent) {
        self.penalties.fetch_add(event.penalty_count, Ordering::SeqCst);
    }
}

fn recording() -> (Arc<RecordingHandler>, EventDispatcher) {
    let handler = Arc::new(RecordingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(handler.clone());
    (handler, dispatcher)
}

struct PanickingCrewCheck;

impl ObjectiveCheck for PanickingCrewCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::CrewPerformance
    }
    fn name(&self) -> &'static str {
        "panicking crew check"
    }
    fn evaluate(&self, _ctx: &CheckContext<'_>) -> CheckResult {
        panic!("crew roster unreadable");
    }
}

struct AbstainingScorer;

impl RobustnessScorer for AbstainingScorer {
    fn name(&self) -> &'static str {
        "abstaining"
    }
    fn score(
        &self,
        _objective: ObjectiveId,
        _evidence: Option<&ObjectiveEvidence>,
    ) -> Option<RobustnessScore> {
        None
    }
}

/// Sleeps before answering, keeping lookups in flight.
struct BlockingCatalog(Duration);

impl RiskRatioCatalog for BlockingCatalog {
    fn measure_risk_ratio(
        &self,
        _path: &MitigationPath,
        _arc: AirRiskClass,
    ) -> Result<f64, MitigationError> {
        std::thread::sleep(self.0);
        Ok(0.01)
    }
}

/// A fully documented operation is compliant with no penalties.
#[test]
fn test_compliant_operation() {
    let result = make_orchestrator()
        .assess(&make_operation(), RuleRevision::V2, None)
        .unwrap();

    assert!(result.compliant, "{}", result.summary);
    assert_eq!(result.target_sail, Sail::II);
    assert_eq!(result.recalculated_sail, Sail::II);
    assert_eq!(result.penalty_count, 0);
    assert_eq!(result.adjusted_arc, AirRiskClass::B);
    assert_eq!(result.outcomes.len(), SAIL_II_V2.len());
    assert!((result.weighted_score - 1.0).abs() < 1e-12);
    assert!(result.recommendations.is_empty());
    assert!(result.summary.ends_with(": COMPLIANT"));
}

/// Outcomes come back ordered by objective id.
#[test]
fn test_outcomes_sorted_by_objective() {
    let result = make_orchestrator()
        .assess(&make_operation(), RuleRevision::V2, None)
        .unwrap();
    let ids: Vec<u8> = result.outcomes.iter().map(|o| o.objective_id.number()).collect();
    assert_eq!(ids, SAIL_II_V2.to_vec());
}

/// Identical inputs serialize to identical JSON.
#[test]
fn test_assessment_is_deterministic() {
    let orchestrator = make_orchestrator();
    let mut op = make_operation();
    op.crew.pilot_certification = CertificationType::Basic;
    op.crew.pilot_flight_hours = 0.0;
    op.crew.trained_ground_crew = 0;

    let first = orchestrator.assess(&op, RuleRevision::V2, None).unwrap();
    let second = orchestrator.assess(&op, RuleRevision::V2, None).unwrap();
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());

    let parsed: sora_analysis::AssessmentResult =
        serde_json::from_str(&first.to_json_pretty().unwrap()).unwrap();
    assert_eq!(parsed.outcomes.len(), first.outcomes.len());
    assert_eq!(parsed.penalty_count, first.penalty_count);
    assert_eq!(parsed.recalculated_sail, first.recalculated_sail);
}

/// A weak crew fails the crew objective, which has no tactical substitute,
/// so one penalty lowers the ARC and the recalculated SAIL.
#[test]
fn test_crew_failure_applies_penalty() {
    let mut op = make_operation();
    op.crew = CrewEvidence {
        pilot_certification: CertificationType::Basic,
        pilot_flight_hours: 0.0,
        recurrent_training_current: true,
        trained_ground_crew: 0,
        trained_visual_observers: 0,
    };

    let result = make_orchestrator().assess(&op, RuleRevision::V2, None).unwrap();
    let crew = result.outcome(oso(9)).unwrap();
    assert_eq!(crew.status, ObjectiveStatus::NonCompliant);
    assert!(crew.penalty_applied);
    assert!((crew.confidence - 0.2).abs() < 1e-12);

    assert!(!result.compliant);
    assert_eq!(result.penalty_count, 1);
    assert_eq!(result.penalties.len(), 1);
    assert_eq!(result.residual_arc, AirRiskClass::B);
    assert_eq!(result.adjusted_arc, AirRiskClass::A);
    assert_eq!(result.target_sail, Sail::II);
    assert_eq!(result.recalculated_sail, Sail::I);
    assert!(result.weighted_score < 1.0);
    assert!(!result.recommendations.is_empty());
}

/// Penalties never push the ARC below ARC-a.
#[test]
fn test_penalties_floor_at_arc_a() {
    let mut op = make_operation();
    op.crew.pilot_certification = CertificationType::None;
    op.crew.pilot_flight_hours = 0.0;
    op.objective_evidence.remove(&oso(1));
    op.objective_evidence.remove(&oso(3));

    let result = make_orchestrator().assess(&op, RuleRevision::V2, None).unwrap();
    assert_eq!(result.penalty_count, 3);
    assert_eq!(result.adjusted_arc, AirRiskClass::A);
}

/// An unknown revision string is rejected before any evaluation.
#[test]
fn test_unknown_revision_rejected() {
    let (handler, dispatcher) = recording();
    let orchestrator = make_orchestrator().with_dispatcher(dispatcher);

    let err = orchestrator
        .assess_str(&make_operation(), "v3", None)
        .unwrap_err();
    assert!(matches!(
        err,
        AssessmentError::Catalog(CatalogError::UnsupportedRevision(_))
    ));
    assert!(err.is_rejection());
    assert_eq!(handler.rejected.load(Ordering::SeqCst), 1);
    assert_eq!(handler.started.load(Ordering::SeqCst), 0);
    assert_eq!(handler.objectives.load(Ordering::SeqCst), 0);
}

/// A subset naming an objective the revision removed is rejected.
#[test]
fn test_subset_with_removed_objective_rejected() {
    let err = make_orchestrator()
        .assess_str(&make_operation(), "v2", Some(&["OSO#13", "OSO#10"]))
        .unwrap_err();
    assert!(matches!(
        err,
        AssessmentError::Catalog(CatalogError::UnknownObjective { .. })
    ));
}

/// Malformed objective ids are rejected.
#[test]
fn test_malformed_objective_id_rejected() {
    let err = make_orchestrator()
        .assess_str(&make_operation(), "v1", Some(&["OSO-13"]))
        .unwrap_err();
    assert!(matches!(
        err,
        AssessmentError::Catalog(CatalogError::InvalidObjectiveId(_))
    ));
}

/// GRC outside 1..=7 is a tier rejection.
#[test]
fn test_ground_risk_out_of_range_rejected() {
    let orchestrator = make_orchestrator();
    for grc in [0u8, 8] {
        let mut op = make_operation();
        op.intrinsic_grc = grc;
        let err = orchestrator.assess(&op, RuleRevision::V2, None).unwrap_err();
        assert!(
            matches!(
                err,
                AssessmentError::Tier(TierError::GroundRiskOutOfRange { value }) if value == grc
            ),
            "grc {grc}: {err}"
        );
    }
}

/// A panicking check marks its objective errored and the run completes.
#[test]
fn test_panicking_check_is_isolated() {
    let orchestrator = make_orchestrator().with_check(Arc::new(PanickingCrewCheck));
    let result = orchestrator
        .assess(&make_operation(), RuleRevision::V2, None)
        .unwrap();

    let crew = result.outcome(oso(9)).unwrap();
    assert_eq!(crew.status, ObjectiveStatus::Errored);
    assert!(crew.penalty_applied);
    assert!(crew.messages.iter().any(|m| m.contains("crew roster unreadable")));

    assert_eq!(result.count_status(ObjectiveStatus::Compliant), SAIL_II_V2.len() - 1);
    assert_eq!(result.penalty_count, 1);
    assert!(!result.compliant);
}

/// Objectives nobody can evaluate are non-compliant but never penalised.
#[test]
fn test_not_implemented_is_not_a_penalty() {
    let orchestrator = make_orchestrator().with_scorer(Arc::new(AbstainingScorer));
    let result = orchestrator
        .assess(&make_operation(), RuleRevision::V2, None)
        .unwrap();

    // 08, 09 and 13 have bespoke checks; the rest fall back to the scorer.
    assert_eq!(result.count_status(ObjectiveStatus::NotImplemented), SAIL_II_V2.len() - 3);
    assert_eq!(result.count_status(ObjectiveStatus::Compliant), 3);
    assert_eq!(result.penalty_count, 0);
    assert_eq!(result.adjusted_arc, result.residual_arc);
    assert_eq!(result.recalculated_sail, result.target_sail);
    assert!(!result.compliant);
    assert!((result.weighted_score - 1.0).abs() < 1e-12);
}

/// A validated, reliable tactical mitigation substitutes for a failed
/// objective that accepts one.
#[test]
fn test_accepted_mitigation_prevents_penalty() {
    let mut op = make_operation();
    op.flight.airspace_analysis = false;
    op.flight.waypoints = 0;
    op.mitigations.push(MitigationSystem {
        kind: MitigationKind::DetectAndAvoid,
        reliability: 0.95,
        applies_to: oso(13),
        active: true,
    });
    let path = MitigationPath::new(MitigationKind::DetectAndAvoid, oso(13));
    let catalog = StaticRiskRatioCatalog::new().with_ratio(path, 0.5);
    let orchestrator = AssessmentOrchestrator::new(Arc::new(catalog));

    let result = orchestrator.assess(&op, RuleRevision::V2, None).unwrap();
    let daa = result.outcome(oso(13)).unwrap();
    assert_eq!(daa.status, ObjectiveStatus::NonCompliant);
    assert_eq!(daa.mitigated_by, Some(path));
    assert!(!daa.penalty_applied);
    assert!(daa.is_satisfied());

    assert_eq!(result.penalty_count, 0);
    assert_eq!(result.mitigation_outcomes.len(), 1);
    assert!(result.mitigation_outcomes[0].compliant);
    assert!(result.compliant, "{}", result.summary);
}

/// An unreliable mitigation is validated but not accepted.
#[test]
fn test_unreliable_mitigation_not_accepted() {
    let mut op = make_operation();
    op.flight.airspace_analysis = false;
    op.flight.waypoints = 0;
    op.mitigations.push(MitigationSystem {
        kind: MitigationKind::DetectAndAvoid,
        reliability: 0.5,
        applies_to: oso(13),
        active: true,
    });
    let path = MitigationPath::new(MitigationKind::DetectAndAvoid, oso(13));
    let catalog = StaticRiskRatioCatalog::new().with_ratio(path, 0.5);
    let orchestrator = AssessmentOrchestrator::new(Arc::new(catalog));

    let result = orchestrator.assess(&op, RuleRevision::V2, None).unwrap();
    let daa = result.outcome(oso(13)).unwrap();
    assert!(daa.mitigated_by.is_none());
    assert!(daa.penalty_applied);
    assert_eq!(result.penalty_count, 1);
}

/// Claimed mitigations that are never needed are still validated, and an
/// unavailable catalog makes the run non-compliant.
#[test]
fn test_unneeded_mitigation_still_validated() {
    let mut op = make_operation();
    op.mitigations.push(MitigationSystem {
        kind: MitigationKind::Parachute,
        reliability: 0.99,
        applies_to: oso(8),
        active: true,
    });

    let result = make_orchestrator().assess(&op, RuleRevision::V2, None).unwrap();
    assert_eq!(result.penalty_count, 0);
    assert_eq!(result.mitigation_outcomes.len(), 1);
    assert!(!result.mitigation_outcomes[0].compliant);
    assert!(result.mitigation_outcomes[0].measured_ratio.is_none());
    assert!(!result.compliant);
}

/// A cancelled run returns no partial result.
#[test]
fn test_cancelled_assessment() {
    let (handler, dispatcher) = recording();
    let orchestrator = make_orchestrator().with_dispatcher(dispatcher);
    let token = CancellationToken::new();
    token.cancel();

    let err = orchestrator
        .assess_with_cancellation(&make_operation(), RuleRevision::V2, None, &token)
        .unwrap_err();
    assert!(matches!(err, AssessmentError::Cancelled));
    assert!(!err.is_rejection());
    assert_eq!(handler.completed.load(Ordering::SeqCst), 0);
}

/// An explicit subset restricts the objective set; an empty one does not.
#[test]
fn test_objective_subset() {
    let orchestrator = make_orchestrator();
    let op = make_operation();

    let subset = [oso(13), oso(9), oso(13)];
    let result = orchestrator.assess(&op, RuleRevision::V2, Some(&subset)).unwrap();
    let ids: Vec<ObjectiveId> = result.outcomes.iter().map(|o| o.objective_id).collect();
    assert_eq!(ids, vec![oso(9), oso(13)]);

    let result = orchestrator.assess(&op, RuleRevision::V2, Some(&[])).unwrap();
    assert_eq!(result.outcomes.len(), SAIL_II_V2.len());
}

/// The requested revision applies even when the operation declares another.
#[test]
fn test_requested_revision_wins() {
    let mut op = make_operation();
    op.declared_revision = RuleRevision::V1;
    let result = make_orchestrator().assess(&op, RuleRevision::V2, None).unwrap();
    assert_eq!(result.revision, RuleRevision::V2);
    assert!(result.summary.starts_with("SORA 2.5"));
}

/// Under v1 the same SAIL resolves a larger objective set.
#[test]
fn test_v1_assessment_uses_v1_catalog() {
    let result = make_orchestrator()
        .assess(&make_operation(), RuleRevision::V1, None)
        .unwrap();
    assert_eq!(result.target_sail, Sail::II);
    assert_eq!(result.outcomes.len(), 18);
    assert!(result.outcome(oso(10)).is_some());
}

/// Snapshots can come from a provider.
#[test]
fn test_assess_mission_via_provider() {
    let mut provider = InMemoryOperationProvider::new();
    provider.insert(make_operation());
    let orchestrator = make_orchestrator();

    let result = orchestrator
        .assess_mission(&provider, "mission-7", Some(RuleRevision::V2), None)
        .unwrap();
    assert_eq!(result.operation_id, "op-survey-7");
    assert!(result.compliant);

    let err = orchestrator
        .assess_mission(&provider, "mission-404", Some(RuleRevision::V2), None)
        .unwrap_err();
    assert!(matches!(err, AssessmentError::Provider(ProviderError::NotFound(_))));
}

/// Lifecycle events fire once per run and once per objective.
#[test]
fn test_events_emitted() {
    let (handler, dispatcher) = recording();
    let orchestrator = make_orchestrator().with_dispatcher(dispatcher);
    let mut op = make_operation();
    op.crew.pilot_certification = CertificationType::None;
    op.crew.pilot_flight_hours = 0.0;

    orchestrator.assess(&op, RuleRevision::V2, None).unwrap();
    assert_eq!(handler.started.load(Ordering::SeqCst), 1);
    assert_eq!(handler.completed.load(Ordering::SeqCst), 1);
    assert_eq!(handler.rejected.load(Ordering::SeqCst), 0);
    assert_eq!(handler.objectives.load(Ordering::SeqCst), SAIL_II_V2.len());
    assert_eq!(handler.penalties.load(Ordering::SeqCst), 1);
}

/// A configured thread count runs on a dedicated pool with the same result.
#[test]
fn test_dedicated_pool_matches_global_pool() {
    let mut config = SoraConfig::default();
    config.assessment.threads = Some(2);
    let dedicated =
        AssessmentOrchestrator::with_config(config, Arc::new(UnavailableRiskRatioCatalog)).unwrap();

    let op = make_operation();
    let a = dedicated.assess(&op, RuleRevision::V2, None).unwrap();
    let b = make_orchestrator().assess(&op, RuleRevision::V2, None).unwrap();
    assert_eq!(a, b);
}

/// Invalid configuration is refused at construction.
#[test]
fn test_invalid_config_rejected() {
    let mut config = SoraConfig::default();
    config.mitigation.acceptance_reliability = Some(1.5);
    let err = AssessmentOrchestrator::with_config(config, Arc::new(UnavailableRiskRatioCatalog))
        .unwrap_err();
    assert!(matches!(err, AssessmentError::Config(_)));
}

/// Without an explicit revision, missions use the configured default.
#[test]
fn test_assess_mission_uses_default_revision() {
    let mut provider = InMemoryOperationProvider::new();
    provider.insert(make_operation());

    let mut config = SoraConfig::default();
    config.assessment.default_revision = Some("v1".to_string());
    let orchestrator =
        AssessmentOrchestrator::with_config(config, Arc::new(UnavailableRiskRatioCatalog)).unwrap();
    let result = orchestrator
        .assess_mission(&provider, "mission-7", None, None)
        .unwrap();
    assert_eq!(result.revision, RuleRevision::V1);
    assert_eq!(result.outcomes.len(), 18);

    let result = make_orchestrator()
        .assess_mission(&provider, "mission-7", None, None)
        .unwrap();
    assert_eq!(result.revision, RuleRevision::V2);
}

/// An unknown aerodrome distance cannot slip past the segregation check:
/// the snapshot is rejected before any evaluation.
#[test]
fn test_nan_aerodrome_distance_rejected() {
    let (handler, dispatcher) = recording();
    let orchestrator = make_orchestrator().with_dispatcher(dispatcher);
    let mut op = make_operation();
    op.flight.nearby_aerodromes.push(Aerodrome {
        name: "EDDM".to_string(),
        distance_m: f64::NAN,
    });

    let err = orchestrator.assess(&op, RuleRevision::V2, None).unwrap_err();
    assert!(
        matches!(
            err,
            AssessmentError::Snapshot(SnapshotError::NegativeOrNonFinite { ref field, .. })
                if field == "flight.nearby_aerodromes[0].distance_m"
        ),
        "{err}"
    );
    assert!(err.is_rejection());
    assert_eq!(handler.rejected.load(Ordering::SeqCst), 1);
    assert_eq!(handler.started.load(Ordering::SeqCst), 0);
}

/// A reliability outside [0, 1] cannot stand in for a failed objective.
#[test]
fn test_out_of_range_reliability_rejected() {
    let mut op = make_operation();
    op.objective_evidence.remove(&oso(6));
    op.mitigations.push(MitigationSystem {
        kind: MitigationKind::Geofencing,
        reliability: 7.5,
        applies_to: oso(6),
        active: true,
    });
    let path = MitigationPath::new(MitigationKind::Geofencing, oso(6));
    let catalog = StaticRiskRatioCatalog::new().with_ratio(path, 0.1);

    let err = AssessmentOrchestrator::new(Arc::new(catalog))
        .assess(&op, RuleRevision::V2, None)
        .unwrap_err();
    assert!(matches!(
        err,
        AssessmentError::Snapshot(SnapshotError::OutOfUnitRange { value, .. }) if value == 7.5
    ));
}

/// Declared scores outside [0, 1] error the objective instead of being
/// clamped into a pass.
#[test]
fn test_out_of_range_evidence_errors_objective() {
    let mut op = make_operation();
    if let Some(evidence) = op.objective_evidence.get_mut(&oso(1)) {
        evidence.integrity = Some(1.5);
    }

    let result = make_orchestrator().assess(&op, RuleRevision::V2, None).unwrap();
    let operator = result.outcome(oso(1)).unwrap();
    assert_eq!(operator.status, ObjectiveStatus::Errored);
    assert!(operator.penalty_applied);
    assert!(operator.messages.iter().any(|m| m.contains("outside [0, 1]")));
    assert_eq!(result.penalty_count, 1);
    assert!(!result.compliant);
}

/// Cancelling while lookups are in flight stops the run after the current
/// lookup, with no partial result.
#[test]
fn test_cancel_during_evaluation() {
    let (handler, dispatcher) = recording();
    let mut config = SoraConfig::default();
    config.mitigation.timeout_ms = Some(500);
    let catalog = BlockingCatalog(Duration::from_secs(2));
    let orchestrator = AssessmentOrchestrator::with_config(config, Arc::new(catalog))
        .unwrap()
        .with_dispatcher(dispatcher);

    // OSO#06 fails without evidence and has three claimed substitutes,
    // validated one after another.
    let mut op = make_operation();
    op.objective_evidence.remove(&oso(6));
    for kind in [
        MitigationKind::Geofencing,
        MitigationKind::FlightTermination,
        MitigationKind::Parachute,
    ] {
        op.mitigations.push(MitigationSystem {
            kind,
            reliability: 0.99,
            applies_to: oso(6),
            active: true,
        });
    }

    let token = CancellationToken::new();
    let canceller = {
        let token = token.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(100));
            token.cancel();
        })
    };

    let started = Instant::now();
    let err = orchestrator
        .assess_with_cancellation(&op, RuleRevision::V2, None, &token)
        .unwrap_err();
    let elapsed = started.elapsed();
    canceller.join().unwrap();

    assert!(matches!(err, AssessmentError::Cancelled));
    assert_eq!(handler.started.load(Ordering::SeqCst), 1);
    assert_eq!(handler.completed.load(Ordering::SeqCst), 0);
    // Three sequential lookups would take 1.5 s.
    assert!(elapsed < Duration::from_millis(1_400), "took {elapsed:?}");
}
