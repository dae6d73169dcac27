//! Operation snapshot provider errors.

use super::error_code::{self, SoraErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("No operation snapshot for mission {0}")]
    NotFound(String),

    #[error("Operation snapshot for mission {mission_id} is malformed: {message}")]
    Malformed { mission_id: String, message: String },
}

impl SoraErrorCode for ProviderError {
    fn error_code(&self) -> &'static str {
        error_code::PROVIDER_ERROR
    }
}
