//! Capability levels and the availability ladder derived from them.
//!
//! Levels are totally ordered by how much of the host runtime they rely on.
//! A host that supports a level supports every level below it, so the
//! selected level alone determines the four availability flags.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Ordered tier of host runtime facilities.
///
/// `Base` needs nothing beyond the crate itself; each higher level adds the
/// marker facilities configured for it. The derived `Ord` follows
/// declaration order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum CapabilityLevel {
    Base,
    Level6,
    Level7,
    Level8,
    Level9,
}

impl CapabilityLevel {
    /// Every level, least capable first.
    pub const ALL: [CapabilityLevel; 5] = [
        CapabilityLevel::Base,
        CapabilityLevel::Level6,
        CapabilityLevel::Level7,
        CapabilityLevel::Level8,
        CapabilityLevel::Level9,
    ];

    /// Levels that have a probe, in the order the selector evaluates them.
    pub const PROBE_ORDER: [CapabilityLevel; 4] = [
        CapabilityLevel::Level9,
        CapabilityLevel::Level8,
        CapabilityLevel::Level7,
        CapabilityLevel::Level6,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityLevel::Base => "base",
            CapabilityLevel::Level6 => "level6",
            CapabilityLevel::Level7 => "level7",
            CapabilityLevel::Level8 => "level8",
            CapabilityLevel::Level9 => "level9",
        }
    }

    /// Whether an adapter running at `self` may use features that need `required`.
    pub fn satisfies(self, required: CapabilityLevel) -> bool {
        self >= required
    }
}

impl fmt::Display for CapabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a capability level.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown capability level: {0}")]
pub struct UnknownLevel(pub String);

impl FromStr for CapabilityLevel {
    type Err = UnknownLevel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        let digits = normalized
            .strip_prefix("level")
            .or_else(|| normalized.strip_prefix('l'))
            .unwrap_or(&normalized);
        match digits {
            "base" => Ok(CapabilityLevel::Base),
            "6" => Ok(CapabilityLevel::Level6),
            "7" => Ok(CapabilityLevel::Level7),
            "8" => Ok(CapabilityLevel::Level8),
            "9" => Ok(CapabilityLevel::Level9),
            _ => Err(UnknownLevel(value.to_string())),
        }
    }
}

impl Serialize for CapabilityLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CapabilityLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Availability ladder for the selected level.
///
/// Only constructible from a level, which keeps the flags monotonic: a set
/// flag implies every lower flag is set.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct AvailabilityFlags {
    level6: bool,
    level7: bool,
    level8: bool,
    level9: bool,
}

impl AvailabilityFlags {
    pub fn for_level(level: CapabilityLevel) -> Self {
        Self {
            level6: level >= CapabilityLevel::Level6,
            level7: level >= CapabilityLevel::Level7,
            level8: level >= CapabilityLevel::Level8,
            level9: level >= CapabilityLevel::Level9,
        }
    }

    /// `Base` is always available.
    pub fn is_available(&self, level: CapabilityLevel) -> bool {
        match level {
            CapabilityLevel::Base => true,
            CapabilityLevel::Level6 => self.level6,
            CapabilityLevel::Level7 => self.level7,
            CapabilityLevel::Level8 => self.level8,
            CapabilityLevel::Level9 => self.level9,
        }
    }
}
