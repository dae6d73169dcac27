//! Operation snapshot provider.
//!
//! The assessment core never builds or mutates operations; it asks a
//! provider for a fully-populated snapshot and reads it.

use crate::errors::ProviderError;
use crate::types::{FxHashMap, Operation};

/// Source of immutable operation snapshots, keyed by mission id.
pub trait OperationProvider: Send + Sync {
    fn snapshot(&self, mission_id: &str) -> Result<Operation, ProviderError>;
}

/// Provider backed by an in-memory map.
#[derive(Debug, Default)]
pub struct InMemoryOperationProvider {
    operations: FxHashMap<String, Operation>,
}

impl InMemoryOperationProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a snapshot, keyed by its `mission_id` (or `operation_id` if
    /// the mission id is empty).
    pub fn insert(&mut self, operation: Operation) {
        let key = if operation.mission_id.is_empty() {
            operation.operation_id.clone()
        } else {
            operation.mission_id.clone()
        };
        self.operations.insert(key, operation);
    }

    /// Parse a JSON snapshot and insert it.
    pub fn insert_json(&mut self, mission_id: &str, json: &str) -> Result<(), ProviderError> {
        let operation: Operation =
            serde_json::from_str(json).map_err(|e| ProviderError::Malformed {
                mission_id: mission_id.to_string(),
                message: e.to_string(),
            })?;
        self.operations.insert(mission_id.to_string(), operation);
        Ok(())
    }
}

impl OperationProvider for InMemoryOperationProvider {
    fn snapshot(&self, mission_id: &str) -> Result<Operation, ProviderError> {
        self.operations
            .get(mission_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(mission_id.to_string()))
    }
}
