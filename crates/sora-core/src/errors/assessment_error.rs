//! Assessment-level errors.

use super::error_code::{self, SoraErrorCode};
use super::{CatalogError, ConfigError, ProviderError, SnapshotError, TierError};

/// Terminal failures of an assessment run.
/// Aggregates subsystem errors via `From` conversions.
///
/// Catalog, tier and snapshot errors are structural rejections raised
/// before any evaluation work begins. Recoverable per-objective and
/// per-mitigation failures never surface here; they are folded into the
/// result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssessmentError {
    #[error("Rejected: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Rejected: {0}")]
    Tier(#[from] TierError),

    #[error("Rejected: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Snapshot error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Assessment cancelled")]
    Cancelled,
}

impl AssessmentError {
    /// True for structurally invalid input: an unsupported revision, an
    /// unknown objective, an out-of-range tier or a malformed snapshot.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Catalog(_) | Self::Tier(_) | Self::Snapshot(_))
    }
}

impl SoraErrorCode for AssessmentError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Catalog(e) => e.error_code(),
            Self::Tier(e) => e.error_code(),
            Self::Snapshot(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Provider(e) => e.error_code(),
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}
