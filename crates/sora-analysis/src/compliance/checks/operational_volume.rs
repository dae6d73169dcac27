//! Operational volume: bounds, containment buffer, aerodrome segregation and
//! controlled-airspace coordination. Each sub-check is worth a quarter of the
//! confidence; any failure blocks compliance.

use serde_json::json;

use sora_core::config::SoraConfig;
use sora_core::constants::{BUFFER_PATH_FRACTION, GPS_HORIZONTAL_ERROR_M, GPS_VERTICAL_ERROR_M};
use sora_core::types::{FlightEvidence, OperationalVolume};

use crate::catalog::CheckKind;
use crate::compliance::types::{CheckContext, CheckResult, ObjectiveCheck};

const SUB_CHECK_WEIGHT: f64 = 0.25;

#[derive(Debug, Clone)]
pub struct OperationalVolumeCheck {
    wind_drift_m_per_min: f64,
    aerodrome_exclusion_radius_m: f64,
}

impl OperationalVolumeCheck {
    pub fn new(wind_drift_m_per_min: f64, aerodrome_exclusion_radius_m: f64) -> Self {
        Self {
            wind_drift_m_per_min,
            aerodrome_exclusion_radius_m,
        }
    }

    pub fn from_config(config: &SoraConfig) -> Self {
        Self::new(
            config.volume.effective_wind_drift_m_per_min(),
            config.volume.effective_aerodrome_exclusion_radius_m(),
        )
    }

    /// Minimum containment buffer for the flight.
    pub fn required_buffer_m(&self, flight: &FlightEvidence) -> f64 {
        let path_share = BUFFER_PATH_FRACTION * flight.path_length_m;
        let gps = GPS_HORIZONTAL_ERROR_M.max(GPS_VERTICAL_ERROR_M);
        let drift = self.wind_drift_m_per_min * flight.flight_duration_min;
        path_share.max(gps).max(drift)
    }

    fn bounds_issue(volume: &OperationalVolume) -> Option<String> {
        if !ordered(volume.x_min_m, volume.x_max_m) {
            Some("x bounds are not ordered (min < max)".to_string())
        } else if !ordered(volume.y_min_m, volume.y_max_m) {
            Some("y bounds are not ordered (min < max)".to_string())
        } else if !ordered(volume.alt_min_m, volume.alt_max_m) {
            Some("altitude bounds are not ordered (min < max)".to_string())
        } else if !ordered_or_equal(volume.alt_max_m, volume.ceiling_m) {
            Some(format!(
                "maximum altitude {:.0} m exceeds the {:.0} m ceiling",
                volume.alt_max_m, volume.ceiling_m
            ))
        } else {
            None
        }
    }
}

/// NaN bounds are never ordered.
fn ordered(min: f64, max: f64) -> bool {
    min < max
}

fn ordered_or_equal(value: f64, limit: f64) -> bool {
    value <= limit
}

impl Default for OperationalVolumeCheck {
    fn default() -> Self {
        Self::from_config(&SoraConfig::default())
    }
}

impl ObjectiveCheck for OperationalVolumeCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::OperationalVolume
    }

    fn name(&self) -> &'static str {
        "Operational Volume"
    }

    fn evaluate(&self, ctx: &CheckContext<'_>) -> CheckResult {
        let flight = &ctx.operation.flight;
        let objective = ctx.objective;
        let mut passed = 0usize;
        let mut failures = Vec::new();
        let mut missing = Vec::new();

        // 1. Bounds
        match &ctx.operation.volume {
            None => missing.push(format!("{objective}: operational volume definition")),
            Some(volume) => match Self::bounds_issue(volume) {
                None => passed += 1,
                Some(issue) => failures.push(issue),
            },
        }

        // 2. Containment buffer
        let required_buffer = self.required_buffer_m(flight);
        match flight.containment_buffer_m {
            None => missing.push(format!("{objective}: declared containment buffer")),
            Some(buffer) if buffer >= required_buffer => passed += 1,
            Some(buffer) => failures.push(format!(
                "containment buffer {buffer:.1} m below required {required_buffer:.1} m"
            )),
        }

        // 3. Aerodrome segregation
        let intrusions: Vec<&str> = flight
            .nearby_aerodromes
            .iter()
            .filter(|a| a.distance_m.is_nan() || a.distance_m < self.aerodrome_exclusion_radius_m)
            .map(|a| a.name.as_str())
            .collect();
        if intrusions.is_empty() {
            passed += 1;
        } else {
            failures.push(format!(
                "within {:.0} m of aerodrome(s): {}",
                self.aerodrome_exclusion_radius_m,
                intrusions.join(", ")
            ));
        }

        // 4. Controlled airspace coordination
        if !flight.in_controlled_airspace || flight.atc_coordination {
            passed += 1;
        } else {
            failures.push("controlled airspace without ATC coordination".to_string());
            missing.push(format!("{objective}: ATC coordination for controlled airspace"));
        }

        let confidence = passed as f64 * SUB_CHECK_WEIGHT;
        let details = json!({
            "checks_passed": passed,
            "required_buffer_m": required_buffer,
            "declared_buffer_m": flight.containment_buffer_m,
            "aerodrome_intrusions": intrusions,
        });

        if passed == 4 {
            CheckResult::pass(confidence, "Operational volume: all 4 checks passed".to_string())
                .with_details(details)
        } else {
            let mut result = CheckResult::fail(
                confidence,
                format!("Operational volume: {passed}/4 checks passed"),
                missing,
            );
            result.messages.extend(failures);
            result.with_details(details)
        }
    }
}
