//! Top-level SORA configuration with 4-layer resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AssessmentConfig, MitigationConfig, PopulationConfig, VolumeConfig};
use crate::errors::ConfigError;
use crate::types::RuleRevision;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Caller overrides (applied via `apply_overrides`)
/// 2. Environment variables (`SORA_*`)
/// 3. Project config (`sora.toml` in the project root)
/// 4. User config (`~/.sora/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SoraConfig {
    pub assessment: AssessmentConfig,
    pub mitigation: MitigationConfig,
    pub volume: VolumeConfig,
    pub population: PopulationConfig,
}

/// Override arguments supplied by the embedding application.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub threads: Option<usize>,
    pub default_revision: Option<String>,
    pub mitigation_timeout_ms: Option<u64>,
    pub acceptance_reliability: Option<f64>,
}

impl SoraConfig {
    /// Load configuration with 4-layer resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        // Unreadable user config is not fatal; continue with defaults.
                        tracing::warn!(error = %e, "ignoring user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join("sora.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): caller overrides
        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: SoraConfig = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &SoraConfig) -> Result<(), ConfigError> {
        if let Some(reliability) = config.mitigation.acceptance_reliability {
            if !(0.0..=1.0).contains(&reliability) {
                return Err(ConfigError::ValidationFailed {
                    field: "mitigation.acceptance_reliability".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        if config.mitigation.timeout_ms == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "mitigation.timeout_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.mitigation.max_outstanding_lookups == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "mitigation.max_outstanding_lookups".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(ref revision) = config.assessment.default_revision {
            if revision.parse::<RuleRevision>().is_err() {
                return Err(ConfigError::ValidationFailed {
                    field: "assessment.default_revision".to_string(),
                    message: format!("unsupported revision '{revision}'"),
                });
            }
        }
        for (field, value) in [
            ("volume.wind_drift_m_per_min", config.volume.wind_drift_m_per_min),
            (
                "volume.aerodrome_exclusion_radius_m",
                config.volume.aerodrome_exclusion_radius_m,
            ),
            (
                "population.high_density_per_km2",
                config.population.high_density_per_km2,
            ),
            (
                "population.altitude_mitigation_agl_m",
                config.population.altitude_mitigation_agl_m,
            ),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be a non-negative number".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Resolved default revision. Validation guarantees it parses.
    pub fn default_revision(&self) -> RuleRevision {
        self.assessment
            .effective_default_revision()
            .parse()
            .unwrap_or(RuleRevision::V2)
    }

    /// Returns the user config path: `~/.sora/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut SoraConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: SoraConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut SoraConfig, other: &SoraConfig) {
        // Assessment
        if other.assessment.threads.is_some() {
            base.assessment.threads = other.assessment.threads;
        }
        if other.assessment.default_revision.is_some() {
            base.assessment.default_revision = other.assessment.default_revision.clone();
        }

        // Mitigation
        if other.mitigation.timeout_ms.is_some() {
            base.mitigation.timeout_ms = other.mitigation.timeout_ms;
        }
        if other.mitigation.acceptance_reliability.is_some() {
            base.mitigation.acceptance_reliability = other.mitigation.acceptance_reliability;
        }
        if other.mitigation.max_outstanding_lookups.is_some() {
            base.mitigation.max_outstanding_lookups = other.mitigation.max_outstanding_lookups;
        }

        // Volume
        if other.volume.wind_drift_m_per_min.is_some() {
            base.volume.wind_drift_m_per_min = other.volume.wind_drift_m_per_min;
        }
        if other.volume.aerodrome_exclusion_radius_m.is_some() {
            base.volume.aerodrome_exclusion_radius_m = other.volume.aerodrome_exclusion_radius_m;
        }

        // Population
        if other.population.high_density_per_km2.is_some() {
            base.population.high_density_per_km2 = other.population.high_density_per_km2;
        }
        if other.population.altitude_mitigation_agl_m.is_some() {
            base.population.altitude_mitigation_agl_m =
                other.population.altitude_mitigation_agl_m;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `SORA_MITIGATION_TIMEOUT_MS`, `SORA_ASSESSMENT_THREADS`, etc.
    fn apply_env_overrides(config: &mut SoraConfig) {
        if let Ok(val) = std::env::var("SORA_ASSESSMENT_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.assessment.threads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SORA_DEFAULT_REVISION") {
            config.assessment.default_revision = Some(val);
        }
        if let Ok(val) = std::env::var("SORA_MITIGATION_TIMEOUT_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.mitigation.timeout_ms = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SORA_MITIGATION_ACCEPTANCE_RELIABILITY") {
            if let Ok(v) = val.parse::<f64>() {
                config.mitigation.acceptance_reliability = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SORA_MITIGATION_MAX_OUTSTANDING_LOOKUPS") {
            if let Ok(v) = val.parse::<usize>() {
                config.mitigation.max_outstanding_lookups = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SORA_POPULATION_HIGH_DENSITY") {
            if let Ok(v) = val.parse::<f64>() {
                config.population.high_density_per_km2 = Some(v);
            }
        }
    }

    /// Apply caller overrides (highest priority).
    fn apply_overrides(config: &mut SoraConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.threads {
            config.assessment.threads = Some(v);
        }
        if let Some(ref v) = overrides.default_revision {
            config.assessment.default_revision = Some(v.clone());
        }
        if let Some(v) = overrides.mitigation_timeout_ms {
            config.mitigation.timeout_ms = Some(v);
        }
        if let Some(v) = overrides.acceptance_reliability {
            config.mitigation.acceptance_reliability = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user-level config directory: `~/.sora/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".sora"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
