//! Tactical mitigation validation configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_OUTSTANDING_LOOKUPS, DEFAULT_MITIGATION_ACCEPTANCE_RELIABILITY,
    DEFAULT_MITIGATION_TIMEOUT_MS,
};

/// Configuration for mitigation validation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MitigationConfig {
    /// Per-call timeout for risk-ratio lookups in milliseconds. Default: 2000.
    pub timeout_ms: Option<u64>,
    /// Minimum reliability for a mitigation to substitute for a failed
    /// objective. Default: 0.9.
    pub acceptance_reliability: Option<f64>,
    /// Lookup threads allowed to outlive their timeout before further
    /// lookups fail fast. Default: 8.
    pub max_outstanding_lookups: Option<usize>,
}

impl MitigationConfig {
    pub fn effective_timeout_ms(&self) -> u64 {
        self.timeout_ms.unwrap_or(DEFAULT_MITIGATION_TIMEOUT_MS)
    }

    pub fn effective_max_outstanding_lookups(&self) -> usize {
        self.max_outstanding_lookups
            .unwrap_or(DEFAULT_MAX_OUTSTANDING_LOOKUPS)
    }

    pub fn effective_acceptance_reliability(&self) -> f64 {
        self.acceptance_reliability
            .unwrap_or(DEFAULT_MITIGATION_ACCEPTANCE_RELIABILITY)
    }
}
