//! ArchetypeProgression - Id-based archetype queries over loaded content
//!
//! The dedication gate is not enforced here: before dedicating, every
//! follow-up feat is still listed when its own checks pass. Callers that
//! want the gate check [`ArchetypeProgression::is_dedicated`] first.

use crate::content::{ArchetypeDefinition, FeatDefinition, RulesContent};
use crate::eligibility::{EligibilityReport, EligibilityResolver};
use crate::error::RulesError;
use crate::snapshot::CharacterSnapshot;
use crate::types::FeatId;
use std::collections::BTreeMap;

/// Archetype queries bound to one content registry
#[derive(Debug, Clone, Copy)]
pub struct ArchetypeProgression<'a> {
    content: &'a RulesContent,
    resolver: EligibilityResolver,
}

impl<'a> ArchetypeProgression<'a> {
    pub fn new(content: &'a RulesContent, resolver: EligibilityResolver) -> Self {
        ArchetypeProgression { content, resolver }
    }

    pub fn content(&self) -> &'a RulesContent {
        self.content
    }

    pub fn archetype(&self, archetype_id: &str) -> Result<&'a ArchetypeDefinition, RulesError> {
        self.content.require_archetype(archetype_id)
    }

    /// The archetype's feats the character can take now, in declared order
    pub fn available_feats(
        &self,
        archetype_id: &str,
        snapshot: &CharacterSnapshot,
    ) -> Result<Vec<&'a FeatDefinition>, RulesError> {
        let archetype = self.archetype(archetype_id)?;
        let mut available = Vec::new();
        for feat_id in &archetype.feats {
            let feat = self.content.require_feat(feat_id.as_str())?;
            if self.resolver.can_take(feat, snapshot) {
                available.push(feat);
            }
        }
        tracing::debug!(
            archetype = archetype_id,
            available = available.len(),
            total = archetype.feats.len(),
            "resolved available archetype feats"
        );
        Ok(available)
    }

    /// The archetype's own prerequisites, independent of any feat check
    pub fn validate_prerequisites(
        &self,
        archetype_id: &str,
        snapshot: &CharacterSnapshot,
    ) -> Result<bool, RulesError> {
        let archetype = self.archetype(archetype_id)?;
        Ok(self.resolver.validate_archetype(archetype, snapshot))
    }

    /// Full report for entering the archetype (taking its dedication)
    pub fn entry_report(
        &self,
        archetype_id: &str,
        snapshot: &CharacterSnapshot,
    ) -> Result<EligibilityReport, RulesError> {
        let archetype = self.archetype(archetype_id)?;
        Ok(self.resolver.check(archetype, snapshot))
    }

    pub fn dedication(&self, archetype_id: &str) -> Result<&'a FeatId, RulesError> {
        Ok(&self.archetype(archetype_id)?.dedication)
    }

    pub fn is_dedicated(
        &self,
        archetype_id: &str,
        snapshot: &CharacterSnapshot,
    ) -> Result<bool, RulesError> {
        Ok(self.archetype(archetype_id)?.is_dedicated(snapshot))
    }

    /// Spell slot table per rank at a character level, whether or not anyone
    /// holds the dedication; empty for non-casting archetypes
    pub fn spell_slots(&self, archetype_id: &str, level: u32) -> Result<BTreeMap<u32, u32>, RulesError> {
        let archetype = self.archetype(archetype_id)?;
        Ok(archetype
            .spellcasting
            .as_ref()
            .map(|casting| casting.slots_at(level))
            .unwrap_or_default())
    }

    /// Spell slots the snapshot actually has from this archetype: the level's
    /// table once the dedication is held, empty otherwise
    pub fn granted_spell_slots(
        &self,
        archetype_id: &str,
        snapshot: &CharacterSnapshot,
    ) -> Result<BTreeMap<u32, u32>, RulesError> {
        if !self.is_dedicated(archetype_id, snapshot)? {
            return Ok(BTreeMap::new());
        }
        self.spell_slots(archetype_id, snapshot.level)
    }
}
