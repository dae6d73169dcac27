//! Adjacent-area population check configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ALTITUDE_MITIGATION_AGL_M, DEFAULT_HIGH_DENSITY_PER_KM2};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PopulationConfig {
    /// Density (people per km²) above which an area is high density. Default: 1500.
    pub high_density_per_km2: Option<f64>,
    /// Height above ground that mitigates a high-density area. Default: 150.
    pub altitude_mitigation_agl_m: Option<f64>,
}

impl PopulationConfig {
    pub fn effective_high_density_per_km2(&self) -> f64 {
        self.high_density_per_km2.unwrap_or(DEFAULT_HIGH_DENSITY_PER_KM2)
    }

    pub fn effective_altitude_mitigation_agl_m(&self) -> f64 {
        self.altitude_mitigation_agl_m
            .unwrap_or(DEFAULT_ALTITUDE_MITIGATION_AGL_M)
    }
}
