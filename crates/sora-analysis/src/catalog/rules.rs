//! Per-revision rule sets.

use sora_core::types::{ObjectiveId, RobustnessLevel, RuleRevision, Sail, StrategyKind};

use super::types::{CheckKind, RequirementEntry};
use super::v1::V1Rules;
use super::v2::V2Rules;

/// Everything that differs between rule revisions.
pub trait VersionRules: Send + Sync {
    fn revision(&self) -> RuleRevision;

    /// All objectives defined by the revision, sorted by id.
    fn entries(&self) -> &'static [RequirementEntry];

    /// Objectives required at `sail`, sorted by id.
    fn objectives_for(&self, sail: Sail) -> Vec<ObjectiveId>;

    /// Multiplier applied to a strategy's base reduction factor.
    /// `None` means the strategy earns no credit under this revision.
    fn strategy_scale(&self, kind: StrategyKind, robustness: RobustnessLevel) -> Option<f64>;

    /// Bespoke check bound to `objective`, if any.
    fn check_for(&self, objective: ObjectiveId) -> Option<CheckKind>;

    fn entry(&self, objective: ObjectiveId) -> Option<&'static RequirementEntry> {
        self.entries().iter().find(|e| e.id == objective)
    }

    fn contains(&self, objective: ObjectiveId) -> bool {
        self.entry(objective).is_some()
    }
}

static V1: V1Rules = V1Rules;
static V2: V2Rules = V2Rules;

/// Rule set for `revision`.
pub fn rules_for(revision: RuleRevision) -> &'static dyn VersionRules {
    match revision {
        RuleRevision::V1 => &V1,
        RuleRevision::V2 => &V2,
    }
}
