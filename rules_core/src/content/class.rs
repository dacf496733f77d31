//! ClassDefinition - A class and its proficiency progressions

use crate::config::ConfigError;
use crate::proficiency::{ProficiencyRank, ProgressionTable};
use crate::snapshot::CharacterSnapshot;
use crate::types::{Ability, ClassId, FeatId, TrackId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A feat a class grants automatically at a level (e.g. Shield Block at 1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassGrant {
    pub level: u32,
    pub feat: FeatId,
}

/// A class, read-only after load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub id: ClassId,
    pub name: String,
    /// Key ability options
    #[serde(default)]
    pub key_ability: Vec<Ability>,
    /// Hit points gained per level (before Constitution)
    #[serde(default)]
    pub hit_points: u32,
    /// One table per track: saves, perception, class DC, weapon and armor categories
    #[serde(default)]
    pub progressions: Vec<ProgressionTable>,
    #[serde(default)]
    pub granted_feats: Vec<ClassGrant>,
}

impl ClassDefinition {
    pub fn new(id: impl Into<ClassId>, name: impl Into<String>) -> Self {
        ClassDefinition {
            id: id.into(),
            name: name.into(),
            key_ability: Vec::new(),
            hit_points: 0,
            progressions: Vec::new(),
            granted_feats: Vec::new(),
        }
    }

    pub fn with_progression(mut self, table: ProgressionTable) -> Self {
        self.progressions.push(table);
        self
    }

    pub fn progression(&self, track: &str) -> Option<&ProgressionTable> {
        self.progressions
            .iter()
            .find(|table| table.track().as_str() == track)
    }

    /// Rank on one track at a level; None if the class has no such track
    pub fn rank_at(&self, track: &str, level: u32) -> Option<ProficiencyRank> {
        self.progression(track).map(|table| table.resolve(level))
    }

    /// Every track resolved at `level`
    pub fn proficiencies_at(&self, level: u32) -> BTreeMap<TrackId, ProficiencyRank> {
        self.progressions
            .iter()
            .map(|table| (table.track().clone(), table.resolve(level)))
            .collect()
    }

    /// Feats the class has granted by `level`
    pub fn granted_feats_at(&self, level: u32) -> impl Iterator<Item = &FeatId> {
        self.granted_feats
            .iter()
            .filter(move |grant| grant.level <= level)
            .map(|grant| &grant.feat)
    }

    /// A snapshot seeded with this class's proficiencies and granted feats.
    /// Ability scores and chosen feats are left to the caller.
    pub fn seed_snapshot(&self, level: u32) -> CharacterSnapshot {
        let mut snapshot =
            CharacterSnapshot::new(level).with_proficiencies(self.proficiencies_at(level));
        snapshot
            .granted_feats
            .extend(self.granted_feats_at(level).cloned());
        snapshot
    }

    /// Structural checks run at load time
    pub fn validate(&self, max_level: u32) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for table in &self.progressions {
            if !seen.insert(table.track()) {
                return Err(ConfigError::ValidationError(format!(
                    "class '{}' has more than one '{}' progression",
                    self.id,
                    table.track()
                )));
            }
            table.check_max_level(max_level)?;
        }
        Ok(())
    }
}
