//! SORA assessment engine.
//!
//! Modules, leaves first:
//! - `catalog`: static OSO tables per rule revision, crosswalk, revision rules
//! - `compliance`: per-objective robustness scoring and bespoke checks
//! - `mitigation`: tactical mitigation validation against risk-ratio thresholds
//! - `risk`: strategic GRC/ARC reduction and the penalty adjustment
//! - `tier`: GRC x ARC -> SAIL matrix
//! - `assessment`: the orchestrator that ties a run together

pub mod assessment;
pub mod catalog;
pub mod compliance;
pub mod mitigation;
pub mod risk;
pub mod tier;

pub use assessment::{AssessmentOrchestrator, AssessmentResult};
