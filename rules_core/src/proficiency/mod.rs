//! Proficiency ranks and level-indexed progression tables

mod progression;

pub use progression::{ProgressionError, ProgressionStep, ProgressionTable};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal competence tier; the discriminant is the bonus the rank grants
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum ProficiencyRank {
    #[default]
    Untrained = 0,
    Trained = 2,
    Expert = 4,
    Master = 6,
    Legendary = 8,
}

impl ProficiencyRank {
    /// Get all ranks in ascending order
    pub fn all() -> &'static [ProficiencyRank] {
        &[
            ProficiencyRank::Untrained,
            ProficiencyRank::Trained,
            ProficiencyRank::Expert,
            ProficiencyRank::Master,
            ProficiencyRank::Legendary,
        ]
    }

    /// Numeric bonus granted by this rank (also its ordinal value)
    pub fn bonus(self) -> i32 {
        self as i32
    }

    /// Full proficiency bonus at a character level.
    ///
    /// Untrained is always 0. Trained and above add the character level
    /// unless `add_level` is false ("proficiency without level").
    pub fn proficiency_bonus(self, level: u32, add_level: bool) -> i32 {
        match self {
            ProficiencyRank::Untrained => 0,
            rank if add_level => rank.bonus() + level as i32,
            rank => rank.bonus(),
        }
    }

    /// Strict name lookup, any case. Returns None for unknown names.
    pub fn parse_name(name: &str) -> Option<ProficiencyRank> {
        match name.trim().to_ascii_lowercase().as_str() {
            "untrained" => Some(ProficiencyRank::Untrained),
            "trained" => Some(ProficiencyRank::Trained),
            "expert" => Some(ProficiencyRank::Expert),
            "master" => Some(ProficiencyRank::Master),
            "legendary" => Some(ProficiencyRank::Legendary),
            _ => None,
        }
    }

    /// Lenient rank-name table used for prerequisite thresholds.
    ///
    /// Unknown names map to Untrained.
    pub fn from_name(name: &str) -> ProficiencyRank {
        Self::parse_name(name).unwrap_or(ProficiencyRank::Untrained)
    }

    /// Rank whose bonus equals `value`, if any
    pub fn from_bonus(value: i32) -> Option<ProficiencyRank> {
        Self::all().iter().copied().find(|rank| rank.bonus() == value)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProficiencyRank::Untrained => "untrained",
            ProficiencyRank::Trained => "trained",
            ProficiencyRank::Expert => "expert",
            ProficiencyRank::Master => "master",
            ProficiencyRank::Legendary => "legendary",
        }
    }
}

impl fmt::Display for ProficiencyRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when a rank name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown proficiency rank: {0}")]
pub struct UnknownRank(pub String);

impl TryFrom<String> for ProficiencyRank {
    type Error = UnknownRank;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        ProficiencyRank::parse_name(&s).ok_or(UnknownRank(s))
    }
}

impl From<ProficiencyRank> for String {
    fn from(rank: ProficiencyRank) -> Self {
        rank.as_str().to_string()
    }
}
