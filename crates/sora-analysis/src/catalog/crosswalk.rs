//! Objective mapping between rule revisions.

use std::collections::BTreeMap;

use sora_core::errors::CatalogError;
use sora_core::types::{ObjectiveId, RuleRevision};

use super::rules::rules_for;

/// v1 objectives folded into a consolidated v2 objective.
const CONSOLIDATED: &[(u8, u8)] = &[
    // Procedures for external-system deterioration, human error and adverse
    // conditions merge into the general operational procedures objective.
    (11, 8),
    (14, 8),
    (21, 8),
    // Crew training for human error and environmental awareness.
    (15, 9),
    (22, 9),
];

/// v1 objectives with no v2 counterpart; the 2.5 containment step covers them.
const REMOVED: &[u8] = &[10, 12];

/// Map every objective of `from` onto its `to` counterpart.
///
/// Only the forward direction (v1 to v2) and the identity mapping exist;
/// consolidation is not invertible.
pub fn crosswalk(
    from: RuleRevision,
    to: RuleRevision,
) -> Result<BTreeMap<ObjectiveId, Option<ObjectiveId>>, CatalogError> {
    let source = rules_for(from);

    if from == to {
        return Ok(source.entries().iter().map(|e| (e.id, Some(e.id))).collect());
    }

    if (from, to) != (RuleRevision::V1, RuleRevision::V2) {
        return Err(CatalogError::UnsupportedCrosswalk {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    let target = rules_for(to);
    let map = source
        .entries()
        .iter()
        .map(|e| {
            let n = e.id.number();
            let mapped = if REMOVED.contains(&n) {
                None
            } else if let Some(&(_, merged)) = CONSOLIDATED.iter().find(|(v1, _)| *v1 == n) {
                Some(ObjectiveId::from_static(merged))
            } else {
                Some(e.id)
            };
            debug_assert!(mapped.map_or(true, |id| target.contains(id)));
            (e.id, mapped)
        })
        .collect();
    Ok(map)
}

/// Translate a single v1 objective into v2.
pub fn forward(objective: ObjectiveId) -> Result<Option<ObjectiveId>, CatalogError> {
    let map = crosswalk(RuleRevision::V1, RuleRevision::V2)?;
    map.get(&objective)
        .copied()
        .ok_or_else(|| CatalogError::UnknownObjective {
            objective: objective.to_string(),
            revision: RuleRevision::V1.to_string(),
        })
}
