//! SORA 2.5: 17 consolidated objectives with an explicit set per SAIL.

use sora_core::types::{ObjectiveId, RobustnessLevel, RuleRevision, Sail, StrategyKind};

use super::rules::VersionRules;
use super::types::{entry, CheckKind, ObjectiveCategory::*, RequirementEntry};

pub(super) static ENTRIES: [RequirementEntry; 17] = [
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
        "UAS components essential to safe operations are designed to an airworthiness design standard",
        TechnicalIssue,
        Sail::IV,
        false,
        1.0,
    ),
    entry(
        5,
        "UAS designed considering system safety and reliability, including adjacent areas",
        TechnicalIssue,
        Sail::III,
        false,
        1.5,
    ),
    entry(
        6,
        "C3 link characteristics are appropriate for the operation",
        TechnicalIssue,
        Sail::II,
        true,
        1.0,
    ),
    entry(7, "Conformity check of the UAS configuration", TechnicalIssue, Sail::I, false, 1.0),
    entry(
        8,
        "Operational procedures are defined, validated and adhered to",
        TechnicalIssue,
        Sail::I,
        false,
        1.5,
    ),
    entry(9, "Remote crew trained and current", TechnicalIssue, Sail::I, false, 1.5),
    entry(
        13,
        "External services supporting UAS operations are adequate",
        ExternalSystems,
        Sail::I,
        true,
        1.5,
    ),
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

const SAIL_I: &[u8] = &[3, 7, 8, 9, 13, 16, 17, 23];
const SAIL_II: &[u8] = &[1, 3, 6, 7, 8, 9, 13, 16, 17, 20, 23];
const SAIL_III: &[u8] = &[1, 2, 3, 5, 6, 7, 8, 9, 13, 16, 17, 18, 19, 20, 23, 24];
const SAIL_IV_TO_VI: &[u8] = &[1, 2, 3, 4, 5, 6, 7, 8, 9, 13, 16, 17, 18, 19, 20, 23, 24];

/// Objective numbers required at each SAIL.
pub(super) fn sail_set(sail: Sail) -> &'static [u8] {
    match sail {
        Sail::I => SAIL_I,
        Sail::II => SAIL_II,
        Sail::III => SAIL_III,
        Sail::IV | Sail::V | Sail::VI => SAIL_IV_TO_VI,
    }
}

pub(super) struct V2Rules;

impl VersionRules for V2Rules {
    fn revision(&self) -> RuleRevision {
        RuleRevision::V2
    }

    fn entries(&self) -> &'static [RequirementEntry] {
        &ENTRIES
    }

    fn objectives_for(&self, sail: Sail) -> Vec<ObjectiveId> {
        sail_set(sail)
            .iter()
            .map(|&n| ObjectiveId::from_static(n))
            .collect()
    }

    /// The emergency response plan is an objective in its own right under
    /// 2.5 and no longer reduces ground risk.
    fn strategy_scale(&self, kind: StrategyKind, _robustness: RobustnessLevel) -> Option<f64> {
        match kind {
            StrategyKind::EmergencyResponsePlan => None,
            _ => Some(1.0),
        }
    }

    fn check_for(&self, objective: ObjectiveId) -> Option<CheckKind> {
        match objective.number() {
            5 => Some(CheckKind::AdjacentArea),
            8 => Some(CheckKind::OperationalVolume),
            9 => Some(CheckKind::CrewPerformance),
            13 => Some(CheckKind::DetectAndAvoid),
            _ => None,
        }
    }
}
