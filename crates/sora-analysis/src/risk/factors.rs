//! Base reduction factors for strategic mitigations.
//!
//! Revision rules scale these (see `VersionRules::strategy_scale`).

use sora_core::types::{RobustnessLevel, StrategyKind};

/// Base reduction factor for a strategy at a declared robustness.
pub fn base_factor(kind: StrategyKind, robustness: RobustnessLevel) -> f64 {
    use RobustnessLevel::*;
    use StrategyKind::*;
    match (kind, robustness) {
        (GroundStrategic, Low) => 0.10,
        (GroundStrategic, Medium) => 0.20,
        (GroundStrategic, High) => 0.30,
        (GroundImpactReduction, Low) => 0.05,
        (GroundImpactReduction, Medium) => 0.15,
        (GroundImpactReduction, High) => 0.25,
        (EmergencyResponsePlan, Low) => 0.0,
        (EmergencyResponsePlan, Medium) => 0.05,
        (EmergencyResponsePlan, High) => 0.10,
        (AirOperationalRestriction, Low) => 0.10,
        (AirOperationalRestriction, Medium) => 0.20,
        (AirOperationalRestriction, High) => 0.30,
        (AirCommonStructure, Low) => 0.05,
        (AirCommonStructure, Medium) => 0.10,
        (AirCommonStructure, High) => 0.20,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_grow_with_robustness() {
        for kind in [
            StrategyKind::GroundStrategic,
            StrategyKind::GroundImpactReduction,
            StrategyKind::EmergencyResponsePlan,
            StrategyKind::AirOperationalRestriction,
            StrategyKind::AirCommonStructure,
        ] {
            let low = base_factor(kind, RobustnessLevel::Low);
            let medium = base_factor(kind, RobustnessLevel::Medium);
            let high = base_factor(kind, RobustnessLevel::High);
            assert!(low <= medium && medium <= high, "{kind:?}");
            assert!((0.0..1.0).contains(&high));
        }
    }
}
