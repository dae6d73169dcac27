//! Operational Safety Objective identifiers.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CatalogError;

/// Identifier of an Operational Safety Objective (`OSO#01`..`OSO#24`).
///
/// The numeric space is shared by both revisions; whether a given number
/// exists under a revision is decided by the requirement catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectiveId(u8);

impl ObjectiveId {
    /// Highest objective number defined by any revision.
    pub const MAX_NUMBER: u8 = 24;

    /// Build an identifier; numbers outside `1..=24` are rejected.
    pub fn new(number: u8) -> Result<Self, CatalogError> {
        if (1..=Self::MAX_NUMBER).contains(&number) {
            Ok(Self(number))
        } else {
            Err(CatalogError::InvalidObjectiveId(number.to_string()))
        }
    }

    /// Const constructor for static tables. Callers guarantee the range.
    pub const fn from_static(number: u8) -> Self {
        Self(number)
    }

    pub fn number(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ObjectiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OSO#{:02}", self.0)
    }
}

impl FromStr for ObjectiveId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let digits = upper
            .strip_prefix("OSO")
            .map(|rest| rest.trim_start_matches(['#', '-', '_', ' ']))
            .unwrap_or(&upper);
        let number: u8 = digits
            .parse()
            .map_err(|_| CatalogError::InvalidObjectiveId(s.to_string()))?;
        Self::new(number).map_err(|_| CatalogError::InvalidObjectiveId(s.to_string()))
    }
}

impl Serialize for ObjectiveId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectiveId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ObjectiveIdVisitor;

        impl Visitor<'_> for ObjectiveIdVisitor {
            type Value = ObjectiveId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an objective id such as \"OSO#05\" or 5")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                let number = u8::try_from(v)
                    .map_err(|_| E::custom(format!("objective {v} out of range")))?;
                ObjectiveId::new(number).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                let number = u8::try_from(v)
                    .map_err(|_| E::custom(format!("objective {v} out of range")))?;
                ObjectiveId::new(number).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(ObjectiveIdVisitor)
    }
}
