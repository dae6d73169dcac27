//! Assessment orchestration configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the assessment orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AssessmentConfig {
    /// Worker threads for per-objective evaluation. Default: 0 (shared rayon pool).
    pub threads: Option<usize>,
    /// Default rule revision when the caller does not name one ("v1" | "v2").
    pub default_revision: Option<String>,
}

impl AssessmentConfig {
    /// Returns the effective thread count, defaulting to 0 (global pool).
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(0)
    }

    /// Returns the effective default revision string, defaulting to "v2".
    pub fn effective_default_revision(&self) -> &str {
        self.default_revision.as_deref().unwrap_or("v2")
    }
}
