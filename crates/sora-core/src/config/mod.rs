//! Configuration system for the SORA engine.
//! TOML-based, 4-layer resolution: overrides > env > project > user > defaults.

pub mod assessment_config;
pub mod mitigation_config;
pub mod population_config;
pub mod sora_config;
pub mod volume_config;

pub use assessment_config::AssessmentConfig;
pub use mitigation_config::MitigationConfig;
pub use population_config::PopulationConfig;
pub use sora_config::{ConfigOverrides, SoraConfig};
pub use volume_config::VolumeConfig;
