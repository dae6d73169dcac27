//! Domain data model for SORA assessments.
//! Rule revisions, risk classes, objective identifiers, and the immutable
//! operation snapshot consumed by the assessment pipeline.

pub mod collections;
pub mod objective;
pub mod operation;
pub mod revision;
pub mod risk;

pub use collections::{FxHashMap, FxHashSet, SmallVec4};
pub use objective::ObjectiveId;
pub use operation::{
    Aerodrome, CertificationType, CrewEvidence, DeclaredStrategy, FlightEvidence,
    MitigationKind, MitigationSystem, ObjectiveEvidence, Operation, OperationalVolume,
    PopulationSample, StrategyKind,
};
pub use revision::RuleRevision;
pub use risk::{AirRiskClass, RobustnessLevel, Sail};
