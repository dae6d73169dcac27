//! Operational volume check configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_AERODROME_EXCLUSION_RADIUS_M, DEFAULT_WIND_DRIFT_M_PER_MIN};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VolumeConfig {
    /// Wind drift buffer per minute of flight, in metres. Default: 2.0.
    pub wind_drift_m_per_min: Option<f64>,
    /// Exclusion radius around aerodromes, in metres. Default: 5000.
    pub aerodrome_exclusion_radius_m: Option<f64>,
}

impl VolumeConfig {
    pub fn effective_wind_drift_m_per_min(&self) -> f64 {
        self.wind_drift_m_per_min.unwrap_or(DEFAULT_WIND_DRIFT_M_PER_MIN)
    }

    pub fn effective_aerodrome_exclusion_radius_m(&self) -> f64 {
        self.aerodrome_exclusion_radius_m
            .unwrap_or(DEFAULT_AERODROME_EXCLUSION_RADIUS_M)
    }
}
