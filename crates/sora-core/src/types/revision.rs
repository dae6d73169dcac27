//! SORA rule revisions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CatalogError;

/// The two mutually exclusive rule revisions an assessment can run under.
///
/// `V1` is SORA 2.0 (24 objectives), `V2` is SORA 2.5 (17 objectives after
/// consolidation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleRevision {
    V1,
    V2,
}

impl RuleRevision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }

    /// Published edition name of the revision.
    pub fn edition(&self) -> &'static str {
        match self {
            Self::V1 => "SORA 2.0",
            Self::V2 => "SORA 2.5",
        }
    }

    pub fn all() -> &'static [RuleRevision] {
        &[Self::V1, Self::V2]
    }
}

impl fmt::Display for RuleRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleRevision {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "2.0" | "sora-2.0" | "sora 2.0" => Ok(Self::V1),
            "v2" | "2.5" | "sora-2.5" | "sora 2.5" => Ok(Self::V2),
            _ => Err(CatalogError::UnsupportedRevision(s.to_string())),
        }
    }
}
