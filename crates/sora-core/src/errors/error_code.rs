//! SoraErrorCode trait for stable, machine-readable error codes.

/// Trait for mapping SORA errors to stable error code strings.
/// Every error enum implements this so callers (API layers, report
/// generators) can branch on a code instead of parsing messages.
pub trait SoraErrorCode {
    /// Returns the error code string (e.g., "UNKNOWN_OBJECTIVE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Structural rejections.
pub const UNSUPPORTED_REVISION: &str = "UNSUPPORTED_REVISION";
pub const UNKNOWN_OBJECTIVE: &str = "UNKNOWN_OBJECTIVE";
pub const INVALID_OBJECTIVE_ID: &str = "INVALID_OBJECTIVE_ID";
pub const UNSUPPORTED_CROSSWALK: &str = "UNSUPPORTED_CROSSWALK";
pub const TIER_OUT_OF_RANGE: &str = "TIER_OUT_OF_RANGE";
pub const INVALID_SNAPSHOT: &str = "INVALID_SNAPSHOT";

// Recovered locally.
pub const EVALUATION_ERROR: &str = "EVALUATION_ERROR";
pub const MITIGATION_UNAVAILABLE: &str = "MITIGATION_UNAVAILABLE";
pub const MITIGATION_TIMEOUT: &str = "MITIGATION_TIMEOUT";

// Ambient.
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const PROVIDER_ERROR: &str = "PROVIDER_ERROR";
pub const CANCELLED: &str = "CANCELLED";
