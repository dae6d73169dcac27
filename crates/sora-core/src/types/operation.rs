//! Immutable operation snapshot.
//!
//! Produced by an upstream collaborator (mission planner, ConOps import) and
//! read-only for the assessment pipeline. Every field that can be absent in a
//! partially-documented ConOps carries a serde default so that a sparse JSON
//! document still deserializes; the evaluators report the gaps as missing
//! evidence instead of failing to parse.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{AirRiskClass, ObjectiveId, RobustnessLevel, RuleRevision};
use crate::errors::{EvaluationError, SnapshotError};
use crate::traits::MitigationPath;

/// Input snapshot for one assessment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub operation_id: String,
    #[serde(default)]
    pub mission_id: String,
    pub declared_revision: RuleRevision,
    /// Intrinsic ground risk class as computed upstream (1..=7).
    pub intrinsic_grc: u8,
    pub initial_arc: AirRiskClass,
    #[serde(default)]
    pub strategies: Vec<DeclaredStrategy>,
    #[serde(default)]
    pub flight: FlightEvidence,
    #[serde(default)]
    pub crew: CrewEvidence,
    #[serde(default)]
    pub volume: Option<OperationalVolume>,
    #[serde(default)]
    pub objective_evidence: BTreeMap<ObjectiveId, ObjectiveEvidence>,
    #[serde(default)]
    pub mitigations: Vec<MitigationSystem>,
}

impl Default for Operation {
    fn default() -> Self {
        Self {
            operation_id: String::new(),
            mission_id: String::new(),
            declared_revision: RuleRevision::V2,
            intrinsic_grc: 1,
            initial_arc: AirRiskClass::B,
            strategies: Vec::new(),
            flight: FlightEvidence::default(),
            crew: CrewEvidence::default(),
            volume: None,
            objective_evidence: BTreeMap::new(),
            mitigations: Vec::new(),
        }
    }
}

impl Operation {
    /// Active tactical mitigation systems claimed by the operator.
    pub fn active_mitigations(&self) -> impl Iterator<Item = &MitigationSystem> {
        self.mitigations.iter().filter(|m| m.active)
    }

    /// Active mitigation systems declared against one objective.
    pub fn mitigations_for(
        &self,
        objective: ObjectiveId,
    ) -> impl Iterator<Item = &MitigationSystem> {
        self.active_mitigations().filter(move |m| m.applies_to == objective)
    }

    pub fn evidence_for(&self, objective: ObjectiveId) -> Option<&ObjectiveEvidence> {
        self.objective_evidence.get(&objective)
    }

    /// Reject measurements outside their physical domain.
    ///
    /// Threshold checks compare with `<` and `>=`, and every comparison with
    /// NaN is false, so a non-finite distance or density would pass them.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let flight = &self.flight;
        non_negative("flight.path_length_m", flight.path_length_m)?;
        non_negative("flight.flight_duration_min", flight.flight_duration_min)?;
        if let Some(buffer) = flight.containment_buffer_m {
            non_negative("flight.containment_buffer_m", buffer)?;
        }
        for (i, aerodrome) in flight.nearby_aerodromes.iter().enumerate() {
            non_negative(
                &format!("flight.nearby_aerodromes[{i}].distance_m"),
                aerodrome.distance_m,
            )?;
        }
        for (i, sample) in flight.population_samples.iter().enumerate() {
            non_negative(
                &format!("flight.population_samples[{i}].density_per_km2"),
                sample.density_per_km2,
            )?;
            non_negative(
                &format!("flight.population_samples[{i}].altitude_agl_m"),
                sample.altitude_agl_m,
            )?;
        }
        non_negative("crew.pilot_flight_hours", self.crew.pilot_flight_hours)?;
        if let Some(volume) = &self.volume {
            volume.validate()?;
        }
        for (i, system) in self.mitigations.iter().enumerate() {
            if !(0.0..=1.0).contains(&system.reliability) {
                return Err(SnapshotError::OutOfUnitRange {
                    field: format!("mitigations[{i}].reliability"),
                    value: system.reliability,
                });
            }
        }
        Ok(())
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), SnapshotError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SnapshotError::NegativeOrNonFinite {
            field: field.to_string(),
            value,
        })
    }
}

/// Strategic mitigation families that reduce ground or air risk before flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StrategyKind {
    /// M1: strategic ground-risk reduction (sheltering, ground risk buffer).
    #[serde(rename = "m1")]
    GroundStrategic,
    /// M2: reduction of the effects of ground impact (parachute, frangibility).
    #[serde(rename = "m2")]
    GroundImpactReduction,
    /// M3: emergency response plan. Folded into the objectives in v2.
    #[serde(rename = "m3")]
    EmergencyResponsePlan,
    /// Strategic air mitigation by operational restriction (time, boundary).
    #[serde(rename = "air-restriction")]
    AirOperationalRestriction,
    /// Strategic air mitigation by common structures and rules.
    #[serde(rename = "air-structure")]
    AirCommonStructure,
}

impl StrategyKind {
    pub fn is_ground(&self) -> bool {
        matches!(
            self,
            Self::GroundStrategic | Self::GroundImpactReduction | Self::EmergencyResponsePlan
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GroundStrategic => "m1",
            Self::GroundImpactReduction => "m2",
            Self::EmergencyResponsePlan => "m3",
            Self::AirOperationalRestriction => "air-restriction",
            Self::AirCommonStructure => "air-structure",
        }
    }
}

/// A strategic mitigation declared in the ConOps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeclaredStrategy {
    pub kind: StrategyKind,
    pub robustness: RobustnessLevel,
}

/// Flight-plan and airspace evidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightEvidence {
    pub path_length_m: f64,
    pub flight_duration_min: f64,
    pub waypoints: u32,
    /// Containment buffer declared around the flight geography.
    pub containment_buffer_m: Option<f64>,
    /// Pre-flight airspace analysis (NOTAM review, airspace charts).
    pub airspace_analysis: bool,
    pub atc_coordination: bool,
    pub in_controlled_airspace: bool,
    pub nearby_aerodromes: Vec<Aerodrome>,
    pub population_samples: Vec<PopulationSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aerodrome {
    pub name: String,
    /// Distance from the operational volume boundary.
    pub distance_m: f64,
}

/// One population-density sample taken along the flight path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationSample {
    pub density_per_km2: f64,
    /// Controlled ground area (access restricted, people sheltered or absent).
    #[serde(default)]
    pub controlled: bool,
    pub altitude_agl_m: f64,
}

/// Remote pilot certification, lowest to highest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificationType {
    #[default]
    None,
    /// Online theoretical training (open category A1/A3 level).
    Basic,
    /// Certificate of competency with practical assessment (A2 / STS level).
    Intermediate,
    /// Full remote pilot certificate for the specific category.
    Advanced,
}

/// Remote crew evidence used by the human-performance objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrewEvidence {
    pub pilot_certification: CertificationType,
    pub pilot_flight_hours: f64,
    pub recurrent_training_current: bool,
    pub trained_ground_crew: u32,
    pub trained_visual_observers: u32,
}

impl Default for CrewEvidence {
    fn default() -> Self {
        Self {
            pilot_certification: CertificationType::None,
            pilot_flight_hours: 0.0,
            recurrent_training_current: true,
            trained_ground_crew: 0,
            trained_visual_observers: 0,
        }
    }
}

/// 3D operational volume in a local metric frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperationalVolume {
    pub x_min_m: f64,
    pub x_max_m: f64,
    pub y_min_m: f64,
    pub y_max_m: f64,
    pub alt_min_m: f64,
    pub alt_max_m: f64,
    /// Authorised altitude ceiling for the operation.
    pub ceiling_m: f64,
}

impl OperationalVolume {
    /// Bounds may be negative in the local frame but must be finite.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let bounds = [
            ("volume.x_min_m", self.x_min_m),
            ("volume.x_max_m", self.x_max_m),
            ("volume.y_min_m", self.y_min_m),
            ("volume.y_max_m", self.y_max_m),
            ("volume.alt_min_m", self.alt_min_m),
            ("volume.alt_max_m", self.alt_max_m),
        ];
        if let Some(&(field, value)) = bounds.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SnapshotError::NonFinite {
                field: field.to_string(),
                value,
            });
        }
        non_negative("volume.ceiling_m", self.ceiling_m)
    }
}

/// Declared technical and procedural evidence for one objective.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveEvidence {
    /// Declared integrity score (technical capability) in [0, 1].
    pub integrity: Option<f64>,
    /// Declared assurance score (procedural confidence) in [0, 1].
    pub assurance: Option<f64>,
    /// References to technical evidence (test reports, design data).
    pub technical: Vec<String>,
    /// References to procedural evidence (manuals, checklists, audits).
    pub procedural: Vec<String>,
}

impl ObjectiveEvidence {
    /// Declared scores must lie in [0, 1]. Non-finite scores count as
    /// undeclared and are reported as missing evidence instead.
    pub fn validate(&self, objective: ObjectiveId) -> Result<(), EvaluationError> {
        for (name, score) in [("integrity", self.integrity), ("assurance", self.assurance)] {
            match score {
                Some(v) if v.is_finite() && !(0.0..=1.0).contains(&v) => {
                    return Err(EvaluationError::InvalidEvidence {
                        objective: objective.to_string(),
                        message: format!("{name} score {v} outside [0, 1]"),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Tactical mitigation systems claimed to reduce risk in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MitigationKind {
    DetectAndAvoid,
    ElectronicConspicuity,
    VisualObserverNetwork,
    FlightTermination,
    Geofencing,
    Parachute,
}

impl MitigationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DetectAndAvoid => "detect-and-avoid",
            Self::ElectronicConspicuity => "electronic-conspicuity",
            Self::VisualObserverNetwork => "visual-observer-network",
            Self::FlightTermination => "flight-termination",
            Self::Geofencing => "geofencing",
            Self::Parachute => "parachute",
        }
    }

    /// Kinds that act on collision risk with other airspace users.
    pub fn is_air_tactical(&self) -> bool {
        matches!(
            self,
            Self::DetectAndAvoid | Self::ElectronicConspicuity | Self::VisualObserverNetwork
        )
    }
}

/// A tactical mitigation system declared by the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationSystem {
    pub kind: MitigationKind,
    /// Measured reliability factor in [0, 1].
    pub reliability: f64,
    pub applies_to: ObjectiveId,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl MitigationSystem {
    pub fn path(&self) -> MitigationPath {
        MitigationPath::new(self.kind, self.applies_to)
    }
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_json_deserializes_with_defaults() {
        let op: Operation = serde_json::from_str(
            r#"{
                "operation_id": "op-1",
                "declared_revision": "v2",
                "intrinsic_grc": 3,
                "initial_arc": "ARC-b"
            }"#,
        )
        .unwrap();
        assert_eq!(op.intrinsic_grc, 3);
        assert!(op.crew.recurrent_training_current);
        assert!(op.volume.is_none());
        assert!(op.mitigations.is_empty());
    }

    #[test]
    fn mitigations_for_filters_inactive() {
        let objective = ObjectiveId::new(13).unwrap();
        let op = Operation {
            mitigations: vec![
                MitigationSystem {
                    kind: MitigationKind::DetectAndAvoid,
                    reliability: 0.95,
                    applies_to: objective,
                    active: true,
                },
                MitigationSystem {
                    kind: MitigationKind::ElectronicConspicuity,
                    reliability: 0.99,
                    applies_to: objective,
                    active: false,
                },
            ],
            ..Default::default()
        };
        assert_eq!(op.mitigations_for(objective).count(), 1);
        assert_eq!(op.active_mitigations().count(), 1);
    }

    #[test]
    fn mitigation_active_defaults_to_true() {
        let m: MitigationSystem = serde_json::from_str(
            r#"{"kind": "parachute", "reliability": 0.9, "applies_to": "OSO#10"}"#,
        )
        .unwrap();
        assert!(m.active);
        assert_eq!(m.path().to_string(), "parachute@OSO#10");
    }

    #[test]
    fn default_operation_is_valid() {
        assert_eq!(Operation::default().validate(), Ok(()));
    }

    #[test]
    fn nan_aerodrome_distance_is_rejected() {
        let mut op = Operation::default();
        op.flight.nearby_aerodromes.push(Aerodrome {
            name: "EDDM".to_string(),
            distance_m: f64::NAN,
        });
        match op.validate() {
            Err(SnapshotError::NegativeOrNonFinite { field, .. }) => {
                assert_eq!(field, "flight.nearby_aerodromes[0].distance_m");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn negative_and_infinite_measurements_are_rejected() {
        let mut op = Operation::default();
        op.flight.path_length_m = -1.0;
        assert!(op.validate().is_err());

        let mut op = Operation::default();
        op.flight.population_samples.push(PopulationSample {
            density_per_km2: f64::INFINITY,
            controlled: false,
            altitude_agl_m: 50.0,
        });
        assert!(op.validate().is_err());

        let mut op = Operation::default();
        op.volume = Some(OperationalVolume {
            x_min_m: -500.0,
            x_max_m: f64::NAN,
            y_min_m: 0.0,
            y_max_m: 10.0,
            alt_min_m: 0.0,
            alt_max_m: 10.0,
            ceiling_m: 120.0,
        });
        assert!(matches!(
            op.validate(),
            Err(SnapshotError::NonFinite { ref field, .. }) if field == "volume.x_max_m"
        ));
    }

    #[test]
    fn reliability_must_be_a_fraction() {
        let mut op = Operation::default();
        op.mitigations.push(MitigationSystem {
            kind: MitigationKind::Geofencing,
            reliability: 7.5,
            applies_to: ObjectiveId::new(6).unwrap(),
            active: true,
        });
        assert!(matches!(
            op.validate(),
            Err(SnapshotError::OutOfUnitRange { value, .. }) if value == 7.5
        ));

        op.mitigations[0].reliability = 1.0;
        assert_eq!(op.validate(), Ok(()));
    }

    #[test]
    fn evidence_scores_outside_unit_range_are_invalid() {
        let objective = ObjectiveId::new(3).unwrap();
        let evidence = ObjectiveEvidence {
            integrity: Some(1.5),
            assurance: Some(0.5),
            ..Default::default()
        };
        assert!(matches!(
            evidence.validate(objective),
            Err(EvaluationError::InvalidEvidence { .. })
        ));

        let undeclared = ObjectiveEvidence {
            integrity: Some(f64::NAN),
            assurance: None,
            ..Default::default()
        };
        assert_eq!(undeclared.validate(objective), Ok(()));
    }
}
