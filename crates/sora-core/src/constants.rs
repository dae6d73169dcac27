//! Shared constants for the SORA assessment engine.

/// Engine version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---- Robustness thresholds (integrity x assurance) ----

/// Required robustness for SAIL I and II.
pub const ROBUSTNESS_LOW: f64 = 0.33;

/// Required robustness for SAIL III and IV.
pub const ROBUSTNESS_MEDIUM: f64 = 0.66;

/// Required robustness for SAIL V and VI.
pub const ROBUSTNESS_HIGH: f64 = 0.95;

// ---- Tactical mitigation risk ratios, keyed by air risk class ----

/// Maximum measured risk ratio accepted at ARC-d.
pub const RISK_RATIO_ARC_D: f64 = 0.10;

/// Maximum measured risk ratio accepted at ARC-c.
pub const RISK_RATIO_ARC_C: f64 = 0.33;

/// Maximum measured risk ratio accepted at ARC-b.
pub const RISK_RATIO_ARC_B: f64 = 0.66;

// ---- Defaults for configurable values ----

/// Minimum reliability for a tactical mitigation to substitute for a failed objective.
pub const DEFAULT_MITIGATION_ACCEPTANCE_RELIABILITY: f64 = 0.9;

/// Per-call timeout for risk-ratio lookups, in milliseconds.
pub const DEFAULT_MITIGATION_TIMEOUT_MS: u64 = 2_000;

/// Risk-ratio lookup threads one validator may leave running after timeouts.
pub const DEFAULT_MAX_OUTSTANDING_LOOKUPS: usize = 8;

/// Containment buffer contribution of wind drift, in metres per flight minute.
pub const DEFAULT_WIND_DRIFT_M_PER_MIN: f64 = 2.0;

/// Exclusion radius around aerodromes, in metres.
pub const DEFAULT_AERODROME_EXCLUSION_RADIUS_M: f64 = 5_000.0;

/// Population density above which an adjacent area counts as high density.
pub const DEFAULT_HIGH_DENSITY_PER_KM2: f64 = 1_500.0;

/// Flights above this height over a high-density area count as mitigated.
pub const DEFAULT_ALTITUDE_MITIGATION_AGL_M: f64 = 150.0;

// ---- Fixed operational-volume buffer terms ----

/// Share of the path length reserved as containment buffer.
pub const BUFFER_PATH_FRACTION: f64 = 0.10;

/// Horizontal GNSS error allowance, in metres.
pub const GPS_HORIZONTAL_ERROR_M: f64 = 3.0;

/// Vertical GNSS error allowance, in metres.
pub const GPS_VERTICAL_ERROR_M: f64 = 5.0;

// ---- Bespoke check thresholds ----

/// Strategic detect-and-avoid evidence items required at ARC-a/b (of 3).
pub const DAA_STRATEGIC_REQUIRED: usize = 2;

/// Waypoints needed for a flight plan to count as waypoint-level planning.
pub const DAA_MIN_WAYPOINTS: u32 = 2;

/// Trained visual observers accepted in lieu of a tactical system at ARC-c/d.
pub const DAA_MIN_VISUAL_OBSERVERS: u32 = 2;

/// Crew rubric: points needed (out of `CREW_MAX_SCORE`) to comply.
pub const CREW_PASSING_SCORE: i32 = 4;

/// Crew rubric maximum.
pub const CREW_MAX_SCORE: i32 = 5;

/// Upper bound on the summed strategic reduction factors.
pub const MAX_TOTAL_REDUCTION: f64 = 0.9;
