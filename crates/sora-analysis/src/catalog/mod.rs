//! Requirement catalog: which objectives apply, per rule revision and SAIL.
//!
//! The tables are `static` and carry no mutation API.

pub mod crosswalk;
pub mod rules;
pub mod types;
mod v1;
mod v2;

pub use crosswalk::crosswalk;
pub use rules::{rules_for, VersionRules};
pub use types::{CheckKind, ObjectiveCategory, RequirementEntry};

use sora_core::errors::CatalogError;
use sora_core::types::{ObjectiveId, RuleRevision, Sail};

/// Objectives required at `sail` under `revision`, sorted by id.
pub fn objectives_for(
    sail: Sail,
    revision: RuleRevision,
) -> Result<Vec<ObjectiveId>, CatalogError> {
    Ok(rules_for(revision).objectives_for(sail))
}

/// Catalog record for `objective` under `revision`.
pub fn entry(
    objective: ObjectiveId,
    revision: RuleRevision,
) -> Result<&'static RequirementEntry, CatalogError> {
    rules_for(revision)
        .entry(objective)
        .ok_or_else(|| CatalogError::UnknownObjective {
            objective: objective.to_string(),
            revision: revision.to_string(),
        })
}

/// Fail on the first id that the revision does not define.
pub fn validate_subset(
    objectives: &[ObjectiveId],
    revision: RuleRevision,
) -> Result<(), CatalogError> {
    for &objective in objectives {
        entry(objective, revision)?;
    }
    Ok(())
}
