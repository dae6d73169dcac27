//! Tactical mitigation validation.

pub mod validator;

pub use validator::{required_ratio, MitigationOutcome, MitigationValidator};
