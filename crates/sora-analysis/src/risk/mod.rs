//! Risk mitigation: strategic reduction and the penalty adjustment.

pub mod engine;
pub mod factors;

pub use engine::{AppliedStrategy, RiskMitigationEngine, RiskMitigationResult};
