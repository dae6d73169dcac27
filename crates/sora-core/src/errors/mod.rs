//! Error handling for the SORA engine.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod assessment_error;
pub mod catalog_error;
pub mod config_error;
pub mod error_code;
pub mod evaluation_error;
pub mod mitigation_error;
pub mod provider_error;
pub mod snapshot_error;
pub mod tier_error;

pub use assessment_error::AssessmentError;
pub use catalog_error::CatalogError;
pub use config_error::ConfigError;
pub use error_code::SoraErrorCode;
pub use evaluation_error::EvaluationError;
pub use mitigation_error::MitigationError;
pub use provider_error::ProviderError;
pub use snapshot_error::SnapshotError;
pub use tier_error::TierError;
