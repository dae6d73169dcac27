//! Assessment orchestration and result assembly.

pub mod orchestrator;
pub mod report;
pub mod types;

pub use orchestrator::AssessmentOrchestrator;
pub use types::AssessmentResult;
