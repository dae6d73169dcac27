//! Tactical mitigation validation against ARC-keyed risk-ratio thresholds.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError};
use serde::{Deserialize, Serialize};

use sora_core::config::SoraConfig;
use sora_core::constants::{
    DEFAULT_MAX_OUTSTANDING_LOOKUPS, RISK_RATIO_ARC_B, RISK_RATIO_ARC_C, RISK_RATIO_ARC_D,
};
use sora_core::errors::MitigationError;
use sora_core::traits::{MitigationPath, RiskRatioCatalog};
use sora_core::types::AirRiskClass;

/// Maximum acceptable measured risk ratio at `arc`; `None` at ARC-a.
pub fn required_ratio(arc: AirRiskClass) -> Option<f64> {
    match arc {
        AirRiskClass::A => None,
        AirRiskClass::B => Some(RISK_RATIO_ARC_B),
        AirRiskClass::C => Some(RISK_RATIO_ARC_C),
        AirRiskClass::D => Some(RISK_RATIO_ARC_D),
    }
}

/// Validation result for one mitigation path at one air risk class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationOutcome {
    pub path: MitigationPath,
    pub arc: AirRiskClass,
    pub required_ratio: Option<f64>,
    pub measured_ratio: Option<f64>,
    pub compliant: bool,
    pub failures: Vec<String>,
}

/// Validates mitigation paths against the external risk-ratio catalog.
///
/// Every catalog call runs on a helper thread bounded by `timeout`.
/// There are no retries: a timeout, an error or a malformed ratio leaves
/// the mitigation not validated.
///
/// A timed-out helper thread keeps running until the catalog returns. At
/// most `max_outstanding` helpers may be alive at once (shared by clones);
/// beyond that, lookups fail fast as `Unavailable`.
#[derive(Clone)]
pub struct MitigationValidator {
    catalog: Arc<dyn RiskRatioCatalog>,
    timeout: Duration,
    max_outstanding: usize,
    outstanding: Arc<AtomicUsize>,
}

impl MitigationValidator {
    pub fn new(catalog: Arc<dyn RiskRatioCatalog>, timeout: Duration) -> Self {
        Self {
            catalog,
            timeout,
            max_outstanding: DEFAULT_MAX_OUTSTANDING_LOOKUPS,
            outstanding: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn from_config(catalog: Arc<dyn RiskRatioCatalog>, config: &SoraConfig) -> Self {
        Self::new(
            catalog,
            Duration::from_millis(config.mitigation.effective_timeout_ms()),
        )
        .with_max_outstanding(config.mitigation.effective_max_outstanding_lookups())
    }

    /// Cap on live lookup threads. Clamped to at least 1.
    pub fn with_max_outstanding(mut self, max_outstanding: usize) -> Self {
        self.max_outstanding = max_outstanding.max(1);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Lookup threads currently alive, including detached ones.
    pub fn outstanding_lookups(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    pub fn validate(&self, path: MitigationPath, arc: AirRiskClass) -> MitigationOutcome {
        let Some(required) = required_ratio(arc) else {
            return MitigationOutcome {
                path,
                arc,
                required_ratio: None,
                measured_ratio: None,
                compliant: true,
                failures: Vec::new(),
            };
        };

        match self.measure(path, arc) {
            Ok(measured) => {
                let compliant = measured <= required;
                let failures = if compliant {
                    Vec::new()
                } else {
                    vec![format!(
                        "{path}: measured risk ratio {measured:.3} exceeds {required:.2} required at {arc}"
                    )]
                };
                MitigationOutcome {
                    path,
                    arc,
                    required_ratio: Some(required),
                    measured_ratio: Some(measured),
                    compliant,
                    failures,
                }
            }
            Err(e) => {
                tracing::warn!(path = %path, arc = %arc, error = %e, "mitigation not validated");
                MitigationOutcome {
                    path,
                    arc,
                    required_ratio: Some(required),
                    measured_ratio: None,
                    compliant: false,
                    failures: vec![e.to_string()],
                }
            }
        }
    }

    /// Query the catalog once, bounded by the timeout.
    pub fn measure(&self, path: MitigationPath, arc: AirRiskClass) -> Result<f64, MitigationError> {
        let slot = LookupSlot::acquire(&self.outstanding, self.max_outstanding).ok_or_else(|| {
            MitigationError::Unavailable {
                path: path.to_string(),
                message: format!(
                    "{} earlier catalog lookups are still outstanding",
                    self.max_outstanding
                ),
            }
        })?;
        let (tx, rx) = bounded(1);
        let catalog = Arc::clone(&self.catalog);
        std::thread::Builder::new()
            .name("sora-risk-ratio".to_string())
            .spawn(move || {
                let _slot = slot;
                // The receiver is gone after a timeout; the late answer is dropped.
                let _ = tx.send(catalog.measure_risk_ratio(&path, arc));
            })
            .map_err(|e| MitigationError::Unavailable {
                path: path.to_string(),
                message: format!("failed to spawn lookup thread: {e}"),
            })?;

        let ratio = match rx.recv_timeout(self.timeout) {
            Ok(result) => result?,
            Err(RecvTimeoutError::Timeout) => {
                return Err(MitigationError::Timeout {
                    path: path.to_string(),
                    timeout_ms: self.timeout.as_millis() as u64,
                })
            }
            Err(RecvTimeoutError::Disconnected) => {
                return Err(MitigationError::Unavailable {
                    path: path.to_string(),
                    message: "catalog lookup terminated without a response".to_string(),
                })
            }
        };

        if !(0.0..=1.0).contains(&ratio) {
            return Err(MitigationError::InvalidRatio {
                path: path.to_string(),
                ratio,
            });
        }
        Ok(ratio)
    }
}

impl std::fmt::Debug for MitigationValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MitigationValidator")
            .field("catalog", &"<RiskRatioCatalog>")
            .field("timeout", &self.timeout)
            .field("max_outstanding", &self.max_outstanding)
            .finish()
    }
}

/// One reserved lookup thread; released on drop.
struct LookupSlot(Arc<AtomicUsize>);

impl LookupSlot {
    fn acquire(counter: &Arc<AtomicUsize>, max: usize) -> Option<Self> {
        counter
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| (n < max).then_some(n + 1))
            .ok()
            .map(|_| Self(Arc::clone(counter)))
    }
}

impl Drop for LookupSlot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}
