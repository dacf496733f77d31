//! CharacterSnapshot - Read-only view of a character's build state

use crate::proficiency::ProficiencyRank;
use crate::types::{Ability, FeatId, TrackId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The character state the rules engine evaluates against.
///
/// Supplied by the caller for each evaluation; the engine never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    /// Character level (1 or higher)
    #[serde(default = "default_level")]
    pub level: u32,
    /// Ability scores by ability
    #[serde(default)]
    pub ability_scores: BTreeMap<Ability, i32>,
    /// Proficiency rank by track/skill id
    #[serde(default)]
    pub proficiencies: BTreeMap<TrackId, ProficiencyRank>,
    /// Feats the player chose
    #[serde(default)]
    pub selected_feats: BTreeSet<FeatId>,
    /// Feats granted automatically (class features, ancestry, archetype grants)
    #[serde(default)]
    pub granted_feats: BTreeSet<FeatId>,
    /// Feats whose required choice (skill, weapon group, ...) is still open
    #[serde(default)]
    pub unresolved_choices: BTreeSet<FeatId>,
}

fn default_level() -> u32 {
    1
}

impl Default for CharacterSnapshot {
    fn default() -> Self {
        CharacterSnapshot::new(1)
    }
}

impl CharacterSnapshot {
    /// Create an empty snapshot at the given level (0 is raised to 1)
    pub fn new(level: u32) -> Self {
        CharacterSnapshot {
            level: level.max(1),
            ability_scores: BTreeMap::new(),
            proficiencies: BTreeMap::new(),
            selected_feats: BTreeSet::new(),
            granted_feats: BTreeSet::new(),
            unresolved_choices: BTreeSet::new(),
        }
    }

    pub fn with_ability(mut self, ability: Ability, score: i32) -> Self {
        self.ability_scores.insert(ability, score);
        self
    }

    pub fn with_proficiency(mut self, track: impl Into<TrackId>, rank: ProficiencyRank) -> Self {
        self.proficiencies.insert(track.into(), rank);
        self
    }

    /// Seed proficiencies in bulk, e.g. from a class at the current level
    pub fn with_proficiencies(
        mut self,
        ranks: impl IntoIterator<Item = (TrackId, ProficiencyRank)>,
    ) -> Self {
        self.proficiencies.extend(ranks);
        self
    }

    pub fn with_feat(mut self, feat: impl Into<FeatId>) -> Self {
        self.selected_feats.insert(feat.into());
        self
    }

    pub fn with_granted_feat(mut self, feat: impl Into<FeatId>) -> Self {
        self.granted_feats.insert(feat.into());
        self
    }

    pub fn with_unresolved_choice(mut self, feat: impl Into<FeatId>) -> Self {
        self.unresolved_choices.insert(feat.into());
        self
    }

    pub fn ability_score(&self, ability: Ability) -> Option<i32> {
        self.ability_scores.get(&ability).copied()
    }

    /// Ability modifier: floor((score - 10) / 2)
    pub fn ability_modifier(&self, ability: Ability) -> Option<i32> {
        self.ability_score(ability)
            .map(|score| (score - 10).div_euclid(2))
    }

    pub fn proficiency(&self, track: &TrackId) -> Option<ProficiencyRank> {
        self.proficiencies.get(track).copied()
    }

    /// Whether the character has the feat, chosen or granted
    pub fn has_feat(&self, feat: &FeatId) -> bool {
        self.selected_feats.contains(feat) || self.granted_feats.contains(feat)
    }

    /// Whether the player already chose this feat
    pub fn has_selected(&self, feat: &FeatId) -> bool {
        self.selected_feats.contains(feat)
    }

    pub fn has_unresolved_choices(&self) -> bool {
        !self.unresolved_choices.is_empty()
    }
}
