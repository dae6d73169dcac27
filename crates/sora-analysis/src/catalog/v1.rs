//! SORA 2.0: 24 objectives, each required from its `min_sail` upward.

use sora_core::types::{ObjectiveId, RobustnessLevel, RuleRevision, Sail, StrategyKind};

use super::rules::VersionRules;
use super::types::{entry, CheckKind, ObjectiveCategory::*, RequirementEntry};

pub(super) static ENTRIES: [RequirementEntry; 24] = [
    entry(1, "Operator is competent and/or proven", TechnicalIssue, Sail::II, false, 1.0),
    entry(
        2,
        "UAS manufactured by competent and/or proven entity",
        TechnicalIssue,
        Sail::III,
        false,
        1.0,
    ),
    entry(
        3,
        "UAS maintained by competent and/or proven entity",
        TechnicalIssue,
        Sail::I,
        false,
        1.0,
    ),
    entry(
        4,
        "UAS developed to authority recognised design standards",
        TechnicalIssue,
        Sail::IV,
        false,
        1.0,
    ),
    entry(
        5,
        "UAS designed considering system safety and reliability",
        TechnicalIssue,
        Sail::III,
        false,
        1.0,
    ),
    entry(
        6,
        "C3 link performance is appropriate for the operation",
        TechnicalIssue,
        Sail::II,
        true,
        1.0,
    ),
    entry(
        7,
        "Inspection of the UAS to ensure consistency with the ConOps",
        TechnicalIssue,
        Sail::I,
        false,
        1.0,
    ),
    entry(
        8,
        "Operational procedures are defined, validated and adhered to",
        TechnicalIssue,
        Sail::I,
        false,
        1.5,
    ),
    entry(
        9,
        "Remote crew trained and current and able to control the abnormal situation",
        TechnicalIssue,
        Sail::I,
        false,
        1.5,
    ),
    entry(10, "Safe recovery from technical issue", TechnicalIssue, Sail::I, true, 1.5),
    entry(
        11,
        "Procedures are in place to handle the deterioration of external systems",
        ExternalSystems,
        Sail::I,
        false,
        1.0,
    ),
    entry(
        12,
        "The UAS is designed to manage the deterioration of external systems",
        ExternalSystems,
        Sail::I,
        true,
        1.0,
    ),
    entry(
        13,
        "External services supporting UAS operations are adequate",
        ExternalSystems,
        Sail::I,
        true,
        1.5,
    ),
    entry(
        14,
        "Operational procedures are defined, validated and adhered to (human error)",
        HumanError,
        Sail::I,
        false,
        1.0,
    ),
    entry(15, "Remote crew trained and current (human error)", HumanError, Sail::I, false, 1.0),
    entry(16, "Multi crew coordination", HumanError, Sail::I, false, 1.0),
    entry(17, "Remote crew is fit to operate", HumanError, Sail::I, false, 1.0),
    entry(
        18,
        "Automatic protection of the flight envelope from human errors",
        HumanError,
        Sail::III,
        true,
        1.0,
    ),
    entry(19, "Safe recovery from human error", HumanError, Sail::III, true, 1.0),
    entry(
        20,
        "A human factors evaluation has been performed and the HMI found appropriate",
        HumanError,
        Sail::II,
        true,
        1.0,
    ),
    entry(
        21,
        "Operational procedures are defined, validated and adhered to (adverse conditions)",
        AdverseConditions,
        Sail::I,
        false,
        1.0,
    ),
    entry(
        22,
        "The remote crew is trained to identify critical environmental conditions",
        AdverseConditions,
        Sail::I,
        false,
        1.0,
    ),
    entry(
        23,
        "Environmental conditions for safe operations are defined, measurable and adhered to",
        AdverseConditions,
        Sail::I,
        false,
        1.0,
    ),
    entry(
        24,
        "UAS designed and qualified for adverse environmental conditions",
        AdverseConditions,
        Sail::III,
        false,
        1.0,
    ),
];

pub(super) struct V1Rules;

impl VersionRules for V1Rules {
    fn revision(&self) -> RuleRevision {
        RuleRevision::V1
    }

    fn entries(&self) -> &'static [RequirementEntry] {
        &ENTRIES
    }

    fn objectives_for(&self, sail: Sail) -> Vec<ObjectiveId> {
        ENTRIES
            .iter()
            .filter(|e| e.applies_at(sail))
            .map(|e| e.id)
            .collect()
    }

    fn strategy_scale(&self, _kind: StrategyKind, _robustness: RobustnessLevel) -> Option<f64> {
        Some(1.0)
    }

    fn check_for(&self, objective: ObjectiveId) -> Option<CheckKind> {
        match objective.number() {
            8 => Some(CheckKind::OperationalVolume),
            9 => Some(CheckKind::CrewPerformance),
            10 => Some(CheckKind::AdjacentArea),
            13 => Some(CheckKind::DetectAndAvoid),
            _ => None,
        }
    }
}
