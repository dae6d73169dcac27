//! Static catalog records.

use serde::Serialize;

use sora_core::types::{ObjectiveId, Sail};

/// Threat groups the objectives are organised under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectiveCategory {
    TechnicalIssue,
    ExternalSystems,
    HumanError,
    AdverseConditions,
}

impl ObjectiveCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TechnicalIssue => "technical-issue",
            Self::ExternalSystems => "external-systems",
            Self::HumanError => "human-error",
            Self::AdverseConditions => "adverse-conditions",
        }
    }
}

/// Objectives scored by a dedicated algorithm instead of declared robustness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckKind {
    DetectAndAvoid,
    OperationalVolume,
    CrewPerformance,
    AdjacentArea,
}

impl CheckKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DetectAndAvoid => "detect-and-avoid",
            Self::OperationalVolume => "operational-volume",
            Self::CrewPerformance => "crew-performance",
            Self::AdjacentArea => "adjacent-area",
        }
    }

    pub fn all() -> &'static [CheckKind] {
        &[
            Self::DetectAndAvoid,
            Self::OperationalVolume,
            Self::CrewPerformance,
            Self::AdjacentArea,
        ]
    }
}

/// One operational safety objective as defined by a rule revision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RequirementEntry {
    pub id: ObjectiveId,
    pub title: &'static str,
    pub category: ObjectiveCategory,
    /// First SAIL at which the objective is required.
    pub min_sail: Sail,
    pub max_sail: Sail,
    /// A validated tactical mitigation may stand in for this objective.
    pub has_tmpr: bool,
    /// Relative weight in the aggregated score.
    pub weight: f64,
}

impl RequirementEntry {
    pub fn applies_at(&self, sail: Sail) -> bool {
        self.min_sail <= sail && sail <= self.max_sail
    }
}

/// Shorthand for the static tables.
pub(super) const fn entry(
    number: u8,
    title: &'static str,
    category: ObjectiveCategory,
    min_sail: Sail,
    has_tmpr: bool,
    weight: f64,
) -> RequirementEntry {
    RequirementEntry {
        id: ObjectiveId::from_static(number),
        title,
        category,
        min_sail,
        max_sail: Sail::VI,
        has_tmpr,
        weight,
    }
}
