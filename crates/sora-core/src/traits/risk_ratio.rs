//! RiskRatioCatalog trait: the mitigation-system catalog seam.
//!
//! The measured risk ratio of a tactical mitigation comes from an external,
//! possibly remote catalog. Standalone deployments use the static table or
//! the always-unavailable catalog; hosts with a live catalog implement the
//! trait themselves.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::MitigationError;
use crate::types::{AirRiskClass, FxHashMap, MitigationKind, ObjectiveId};

/// Lookup key for a tactical mitigation: the system type applied to an
/// objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MitigationPath {
    pub kind: MitigationKind,
    pub objective: ObjectiveId,
}

impl MitigationPath {
    pub fn new(kind: MitigationKind, objective: ObjectiveId) -> Self {
        Self { kind, objective }
    }
}

impl fmt::Display for MitigationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind.as_str(), self.objective)
    }
}

/// Provider of measured risk ratios for tactical mitigations.
///
/// Implementations may block on I/O. Callers bound every call with a
/// timeout and never retry; any error means "not validated".
///
/// A call that outlives its timeout is abandoned, not interrupted: the
/// thread running it stays alive until the implementation returns, and a
/// validator only lets a bounded number of such threads pile up. Hanging
/// implementations should enforce their own I/O deadlines.
pub trait RiskRatioCatalog: Send + Sync {
    fn measure_risk_ratio(
        &self,
        path: &MitigationPath,
        arc: AirRiskClass,
    ) -> Result<f64, MitigationError>;
}

/// In-memory catalog of measured ratios.
///
/// Lookup order: an ARC-specific entry for the path, then the path-wide
/// entry, otherwise `Unavailable`.
#[derive(Debug, Clone, Default)]
pub struct StaticRiskRatioCatalog {
    ratios: FxHashMap<MitigationPath, f64>,
    arc_ratios: FxHashMap<(MitigationPath, AirRiskClass), f64>,
}

impl StaticRiskRatioCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ratio measured for the path at every air risk class.
    pub fn with_ratio(mut self, path: MitigationPath, ratio: f64) -> Self {
        self.ratios.insert(path, ratio);
        self
    }

    /// Ratio measured for the path at one air risk class.
    pub fn with_arc_ratio(mut self, path: MitigationPath, arc: AirRiskClass, ratio: f64) -> Self {
        self.arc_ratios.insert((path, arc), ratio);
        self
    }

    pub fn len(&self) -> usize {
        self.ratios.len() + self.arc_ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RiskRatioCatalog for StaticRiskRatioCatalog {
    fn measure_risk_ratio(
        &self,
        path: &MitigationPath,
        arc: AirRiskClass,
    ) -> Result<f64, MitigationError> {
        self.arc_ratios
            .get(&(*path, arc))
            .or_else(|| self.ratios.get(path))
            .copied()
            .ok_or_else(|| MitigationError::Unavailable {
                path: path.to_string(),
                message: "no measured ratio in catalog".to_string(),
            })
    }
}

/// Catalog for standalone mode without any measurement source.
/// Every lookup fails, so every non-trivial mitigation is fail-closed.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableRiskRatioCatalog;

impl RiskRatioCatalog for UnavailableRiskRatioCatalog {
    fn measure_risk_ratio(
        &self,
        path: &MitigationPath,
        _arc: AirRiskClass,
    ) -> Result<f64, MitigationError> {
        Err(MitigationError::Unavailable {
            path: path.to_string(),
            message: "no mitigation catalog configured".to_string(),
        })
    }
}
