//! Seams to external collaborators and cross-cutting behaviour.

pub mod cancellation;
pub mod operation_provider;
pub mod risk_ratio;

pub use cancellation::{Cancellable, CancellationToken};
pub use operation_provider::{InMemoryOperationProvider, OperationProvider};
pub use risk_ratio::{
    MitigationPath, RiskRatioCatalog, StaticRiskRatioCatalog, UnavailableRiskRatioCatalog,
};
