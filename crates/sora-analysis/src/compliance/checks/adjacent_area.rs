//! Adjacent area: unmitigated high-density population along the path.

use serde_json::json;

use sora_core::config::SoraConfig;
use sora_core::types::{PopulationSample, SmallVec4};

use crate::catalog::CheckKind;
use crate::compliance::types::{CheckContext, CheckResult, ObjectiveCheck};

#[derive(Debug, Clone)]
pub struct AdjacentAreaCheck {
    high_density_per_km2: f64,
    altitude_mitigation_agl_m: f64,
}

impl AdjacentAreaCheck {
    pub fn new(high_density_per_km2: f64, altitude_mitigation_agl_m: f64) -> Self {
        Self {
            high_density_per_km2,
            altitude_mitigation_agl_m,
        }
    }

    pub fn from_config(config: &SoraConfig) -> Self {
        Self::new(
            config.population.effective_high_density_per_km2(),
            config.population.effective_altitude_mitigation_agl_m(),
        )
    }

    /// Uncontrolled high-density sample not mitigated by altitude.
    pub fn is_flagged(&self, sample: &PopulationSample) -> bool {
        sample.density_per_km2 > self.high_density_per_km2
            && !sample.controlled
            && sample.altitude_agl_m <= self.altitude_mitigation_agl_m
    }

    /// Ground-risk impact of `flagged` unmitigated areas.
    pub fn grc_delta(flagged: usize) -> u8 {
        match flagged {
            0 => 0,
            1 | 2 => 1,
            _ => 2,
        }
    }
}

impl Default for AdjacentAreaCheck {
    fn default() -> Self {
        Self::from_config(&SoraConfig::default())
    }
}

impl ObjectiveCheck for AdjacentAreaCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::AdjacentArea
    }

    fn name(&self) -> &'static str {
        "Adjacent Area"
    }

    fn evaluate(&self, ctx: &CheckContext<'_>) -> CheckResult {
        let samples = &ctx.operation.flight.population_samples;
        if samples.is_empty() {
            return CheckResult::fail(
                0.0,
                "No population samples along the flight path".to_string(),
                vec![format!("{}: population density samples along the path", ctx.objective)],
            );
        }

        let flagged = samples.iter().filter(|s| self.is_flagged(s)).count();
        let delta = Self::grc_delta(flagged);
        let confidence = (samples.len() - flagged) as f64 / samples.len() as f64;
        let details = json!({
            "samples": samples.len(),
            "flagged": flagged,
            "grc_delta": delta,
            "high_density_per_km2": self.high_density_per_km2,
        });

        if delta == 0 {
            CheckResult::pass(
                confidence,
                format!("No unmitigated high-density areas in {} samples", samples.len()),
            )
            .with_details(details)
        } else {
            CheckResult::fail(
                confidence,
                format!(
                    "{flagged} unmitigated high-density area(s), ground risk impact +{delta}"
                ),
                SmallVec4::new(),
            )
            .with_details(details)
        }
    }
}
