//! ArchetypeDefinition - Dedication + feat bundle, with optional spellcasting

use super::Selectable;
use crate::prerequisite::Prerequisite;
use crate::types::{ArchetypeId, FeatId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An archetype, read-only after load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchetypeDefinition {
    pub id: ArchetypeId,
    pub name: String,
    /// The gate feat; must be the first entry of `feats`
    pub dedication: FeatId,
    /// Archetype feats in declared order
    pub feats: Vec<FeatId>,
    /// All must hold to enter the archetype
    #[serde(default)]
    pub prerequisites: Vec<Prerequisite>,
    /// Alternative prerequisite text for display only; not evaluated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative: Option<String>,
    /// Multiclass spellcasting granted by the archetype
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spellcasting: Option<SpellcastingProgression>,
}

impl ArchetypeDefinition {
    /// Create an archetype whose feat list starts with its dedication
    pub fn new(
        id: impl Into<ArchetypeId>,
        name: impl Into<String>,
        dedication: impl Into<FeatId>,
    ) -> Self {
        let dedication = dedication.into();
        ArchetypeDefinition {
            id: id.into(),
            name: name.into(),
            feats: vec![dedication.clone()],
            dedication,
            prerequisites: Vec::new(),
            alternative: None,
            spellcasting: None,
        }
    }

    pub fn with_feat(mut self, feat: impl Into<FeatId>) -> Self {
        self.feats.push(feat.into());
        self
    }

    pub fn with_prerequisite(mut self, prereq: Prerequisite) -> Self {
        self.prerequisites.push(prereq);
        self
    }

    pub fn with_spellcasting(mut self, spellcasting: SpellcastingProgression) -> Self {
        self.spellcasting = Some(spellcasting);
        self
    }

    /// Whether the character has taken this archetype's dedication
    pub fn is_dedicated(&self, snapshot: &crate::snapshot::CharacterSnapshot) -> bool {
        snapshot.has_feat(&self.dedication)
    }

    /// Structural checks run at load time
    pub fn validate(&self) -> Result<(), String> {
        if self.feats.first() != Some(&self.dedication) {
            return Err(format!(
                "archetype '{}' must list its dedication '{}' as the first feat",
                self.id, self.dedication
            ));
        }
        if let Some(spellcasting) = &self.spellcasting {
            spellcasting
                .validate()
                .map_err(|e| format!("archetype '{}': {}", self.id, e))?;
        }
        Ok(())
    }
}

impl Selectable for ArchetypeDefinition {
    /// Entering an archetype means taking its dedication
    fn selection_id(&self) -> &FeatId {
        &self.dedication
    }

    fn prerequisites(&self) -> &[Prerequisite] {
        &self.prerequisites
    }
}

/// Magical tradition of a spellcasting progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tradition {
    Arcane,
    Divine,
    Occult,
    Primal,
}

impl fmt::Display for Tradition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tradition::Arcane => "arcane",
            Tradition::Divine => "divine",
            Tradition::Occult => "occult",
            Tradition::Primal => "primal",
        };
        f.write_str(name)
    }
}

/// Prepared or spontaneous casting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastingKind {
    Prepared,
    Spontaneous,
}

/// From character `level` onward, `count` slots of `spell_rank` (0 = cantrips)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGrant {
    pub level: u32,
    pub spell_rank: u32,
    pub count: u32,
}

/// Auxiliary spell slot table for multiclass casting archetypes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellcastingProgression {
    pub tradition: Tradition,
    pub kind: CastingKind,
    /// Highest spell rank the archetype can ever grant
    pub max_spell_rank: u32,
    #[serde(default)]
    pub slots: Vec<SlotGrant>,
}

impl SpellcastingProgression {
    /// Slot counts per spell rank at a character level.
    ///
    /// For each rank the grant with the greatest level ≤ `level` applies.
    /// Ranks with no unlocked grant are absent.
    pub fn slots_at(&self, level: u32) -> BTreeMap<u32, u32> {
        let mut best: BTreeMap<u32, SlotGrant> = BTreeMap::new();
        for grant in self.slots.iter().filter(|grant| grant.level <= level) {
            match best.get(&grant.spell_rank) {
                Some(current) if current.level >= grant.level => {}
                _ => {
                    best.insert(grant.spell_rank, *grant);
                }
            }
        }
        best.into_iter()
            .filter(|(_, grant)| grant.count > 0)
            .map(|(rank, grant)| (rank, grant.count))
            .collect()
    }

    /// Highest non-cantrip spell rank castable at `level`
    pub fn max_spell_rank_at(&self, level: u32) -> Option<u32> {
        self.slots_at(level)
            .into_keys()
            .filter(|rank| *rank > 0)
            .max()
    }

    /// Structural checks: ranks within range, one grant per (level, rank),
    /// and per-rank counts never decrease with level
    pub fn validate(&self) -> Result<(), String> {
        let mut by_rank: BTreeMap<u32, Vec<SlotGrant>> = BTreeMap::new();
        for grant in &self.slots {
            if grant.spell_rank > self.max_spell_rank {
                return Err(format!(
                    "slot grant at level {} is rank {}, above max rank {}",
                    grant.level, grant.spell_rank, self.max_spell_rank
                ));
            }
            by_rank.entry(grant.spell_rank).or_default().push(*grant);
        }

        for (rank, grants) in &mut by_rank {
            grants.sort_by_key(|grant| grant.level);
            for pair in grants.windows(2) {
                if pair[0].level == pair[1].level {
                    return Err(format!(
                        "rank {} has two slot grants at level {}",
                        rank, pair[0].level
                    ));
                }
                if pair[1].count < pair[0].count {
                    return Err(format!(
                        "rank {} slots drop from {} to {} at level {}",
                        rank, pair[0].count, pair[1].count, pair[1].level
                    ));
                }
            }
        }
        Ok(())
    }
}
