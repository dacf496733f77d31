//! Core identifier and ability types shared across the rules engine

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }
    };
}

id_type!(
    /// Identifier for a feat (e.g. "barbarian-dedication")
    FeatId
);
id_type!(
    /// Identifier for an archetype (e.g. "medic")
    ArchetypeId
);
id_type!(
    /// Identifier for a class (e.g. "fighter")
    ClassId
);
id_type!(
    /// Identifier for a proficiency track or skill (e.g. "fortitude", "medicine", "martial_weapons")
    ///
    /// Track ids are matched exactly; content and snapshots must agree on spelling.
    TrackId
);

/// The six ability scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// Get all abilities in sheet order
    pub fn all() -> &'static [Ability] {
        &[
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }

    /// Lowercase key used in content and snapshot files
    pub fn as_str(&self) -> &'static str {
        match self {
            Ability::Strength => "strength",
            Ability::Dexterity => "dexterity",
            Ability::Constitution => "constitution",
            Ability::Intelligence => "intelligence",
            Ability::Wisdom => "wisdom",
            Ability::Charisma => "charisma",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when an ability name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ability: {0}")]
pub struct UnknownAbility(pub String);

impl FromStr for Ability {
    type Err = UnknownAbility;

    /// Accepts full names and the usual three-letter abbreviations, any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strength" | "str" => Ok(Ability::Strength),
            "dexterity" | "dex" => Ok(Ability::Dexterity),
            "constitution" | "con" => Ok(Ability::Constitution),
            "intelligence" | "int" => Ok(Ability::Intelligence),
            "wisdom" | "wis" => Ok(Ability::Wisdom),
            "charisma" | "cha" => Ok(Ability::Charisma),
            _ => Err(UnknownAbility(s.to_string())),
        }
    }
}

impl TryFrom<String> for Ability {
    type Error = UnknownAbility;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Ability> for String {
    fn from(ability: Ability) -> Self {
        ability.as_str().to_string()
    }
}
