//! Ordered risk scales: Air Risk Class, SAIL, and mitigation robustness.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TierError;

/// Air Risk Class, ordered from lowest (`A`) to highest (`D`) collision risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AirRiskClass {
    #[serde(rename = "ARC-a")]
    A,
    #[serde(rename = "ARC-b")]
    B,
    #[serde(rename = "ARC-c")]
    C,
    #[serde(rename = "ARC-d")]
    D,
}

impl AirRiskClass {
    /// Lowest class on the scale.
    pub const LOWEST: AirRiskClass = AirRiskClass::A;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "ARC-a",
            Self::B => "ARC-b",
            Self::C => "ARC-c",
            Self::D => "ARC-d",
        }
    }

    /// 1-based position on the scale (`A` = 1, `D` = 4).
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::A => 1,
            Self::B => 2,
            Self::C => 3,
            Self::D => 4,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Result<Self, TierError> {
        match ordinal {
            1 => Ok(Self::A),
            2 => Ok(Self::B),
            3 => Ok(Self::C),
            4 => Ok(Self::D),
            other => Err(TierError::AirRiskOutOfRange { ordinal: other }),
        }
    }

    /// Move `steps` positions down the scale, saturating at `A`.
    pub fn step_down(self, steps: usize) -> Self {
        let ordinal = (self.ordinal() as usize).saturating_sub(steps).max(1);
        // ordinal is in 1..=4 by construction.
        Self::from_ordinal(ordinal as u8).unwrap_or(Self::LOWEST)
    }

    /// True for the classes where strategic evidence alone is acceptable.
    pub fn is_low(&self) -> bool {
        matches!(self, Self::A | Self::B)
    }

    pub fn all() -> &'static [AirRiskClass] {
        &[Self::A, Self::B, Self::C, Self::D]
    }
}

impl fmt::Display for AirRiskClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AirRiskClass {
    type Err = TierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let letter = lowered.strip_prefix("arc-").unwrap_or(&lowered);
        match letter {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            "c" => Ok(Self::C),
            "d" => Ok(Self::D),
            _ => Err(TierError::UnknownAirRiskClass(s.to_string())),
        }
    }
}

/// Specific Assurance and Integrity Level, ordered `I` (lowest) to `VI`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sail {
    I,
    II,
    III,
    IV,
    V,
    VI,
}

impl Sail {
    pub const MAX: Sail = Sail::VI;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::I => "I",
            Self::II => "II",
            Self::III => "III",
            Self::IV => "IV",
            Self::V => "V",
            Self::VI => "VI",
        }
    }

    /// 1-based position on the scale.
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::I => 1,
            Self::II => 2,
            Self::III => 3,
            Self::IV => 4,
            Self::V => 5,
            Self::VI => 6,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Result<Self, TierError> {
        match ordinal {
            1 => Ok(Self::I),
            2 => Ok(Self::II),
            3 => Ok(Self::III),
            4 => Ok(Self::IV),
            5 => Ok(Self::V),
            6 => Ok(Self::VI),
            other => Err(TierError::SailOutOfRange { ordinal: other }),
        }
    }

    pub fn all() -> &'static [Sail] {
        &[Self::I, Self::II, Self::III, Self::IV, Self::V, Self::VI]
    }
}

impl fmt::Display for Sail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SAIL {}", self.as_str())
    }
}

/// Declared robustness of a strategic mitigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RobustnessLevel {
    Low,
    Medium,
    High,
}
