//! EligibilityResolver - Decides whether a character may take a feat or archetype
//!
//! Checks run in order and the boolean form stops at the first failure:
//! 1. every prerequisite holds
//! 2. optionally, the character's level reaches the feat's declared level
//! 3. the feat is not already selected (feats are not repeatable)
//! 4. optionally, no feat choices are left unresolved
//!
//! Content that needs a level gate by default states it as a `level`
//! prerequisite; the declared feat level is only enforced when enabled.

mod report;

pub use report::{EligibilityReport, Ineligibility};

use crate::config::RulesConfig;
use crate::content::{ArchetypeDefinition, Selectable};
use crate::prerequisite::{evaluate_all, unmet_prerequisites};
use crate::snapshot::CharacterSnapshot;

/// Stateless eligibility checks; cheap to copy and share
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EligibilityResolver {
    enforce_feat_level: bool,
    require_resolved_choices: bool,
}

impl EligibilityResolver {
    /// Resolver with the default checks: prerequisites and duplicates only
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RulesConfig) -> Self {
        EligibilityResolver {
            enforce_feat_level: config.eligibility.enforce_feat_level,
            require_resolved_choices: config.eligibility.require_resolved_choices,
        }
    }

    /// Enable or disable the declared feat level check
    pub fn with_feat_level(mut self, enforced: bool) -> Self {
        self.enforce_feat_level = enforced;
        self
    }

    pub fn enforces_feat_level(&self) -> bool {
        self.enforce_feat_level
    }

    /// Enable or disable the unresolved-choice check
    pub fn with_resolved_choices(mut self, required: bool) -> Self {
        self.require_resolved_choices = required;
        self
    }

    pub fn requires_resolved_choices(&self) -> bool {
        self.require_resolved_choices
    }

    /// Whether the character may take `item` now
    pub fn can_take<S: Selectable + ?Sized>(&self, item: &S, snapshot: &CharacterSnapshot) -> bool {
        let id = item.selection_id();

        if !evaluate_all(item.prerequisites(), snapshot) {
            tracing::debug!(feat = %id, "prerequisites not met");
            return false;
        }
        if self.enforce_feat_level && snapshot.level < item.level() {
            tracing::debug!(feat = %id, required = item.level(), actual = snapshot.level, "level too low");
            return false;
        }
        if snapshot.has_selected(id) {
            tracing::debug!(feat = %id, "already selected");
            return false;
        }
        if self.require_resolved_choices && snapshot.has_unresolved_choices() {
            tracing::debug!(feat = %id, "unresolved feat choices pending");
            return false;
        }
        true
    }

    /// Every reason the character cannot take `item`; empty when eligible
    pub fn check<S: Selectable + ?Sized>(
        &self,
        item: &S,
        snapshot: &CharacterSnapshot,
    ) -> EligibilityReport {
        let mut failures: Vec<Ineligibility> = unmet_prerequisites(item.prerequisites(), snapshot)
            .into_iter()
            .cloned()
            .map(Ineligibility::UnmetPrerequisite)
            .collect();

        if self.enforce_feat_level && snapshot.level < item.level() {
            failures.push(Ineligibility::LevelTooLow {
                required: item.level(),
                actual: snapshot.level,
            });
        }
        if snapshot.has_selected(item.selection_id()) {
            failures.push(Ineligibility::AlreadySelected);
        }
        if self.require_resolved_choices && snapshot.has_unresolved_choices() {
            failures.push(Ineligibility::UnresolvedChoices(
                snapshot.unresolved_choices.iter().cloned().collect(),
            ));
        }

        EligibilityReport {
            feat: item.selection_id().clone(),
            failures,
        }
    }

    /// The archetype's own prerequisites only, independent of any feat check
    pub fn validate_archetype(
        &self,
        archetype: &ArchetypeDefinition,
        snapshot: &CharacterSnapshot,
    ) -> bool {
        evaluate_all(&archetype.prerequisites, snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FeatDefinition;
    use crate::prerequisite::{Comparison, Prerequisite};
    use crate::proficiency::ProficiencyRank;
    use crate::types::Ability;

    fn barbarian_dedication() -> FeatDefinition {
        FeatDefinition::new("barbarian-dedication", "Barbarian Dedication", 2)
            .with_trait("dedication")
            .with_prerequisite(Prerequisite::ability(
                Ability::Strength,
                Comparison::AtLeast,
                "14",
            ))
    }

    fn strong(level: u32, score: i32) -> CharacterSnapshot {
        CharacterSnapshot::new(level).with_ability(Ability::Strength, score)
    }

    #[test]
    fn test_prerequisites_decide() {
        let resolver = EligibilityResolver::new();
        let feat = barbarian_dedication();
        assert!(resolver.can_take(&feat, &strong(3, 16)));
        assert!(!resolver.can_take(&feat, &strong(3, 12)));
    }

    #[test]
    fn test_duplicate_excluded_even_when_prerequisites_hold() {
        let resolver = EligibilityResolver::new();
        let feat = barbarian_dedication();
        let snapshot = strong(3, 16).with_feat("barbarian-dedication");

        assert!(!resolver.can_take(&feat, &snapshot));
        let report = resolver.check(&feat, &snapshot);
        assert_eq!(report.failures, vec![Ineligibility::AlreadySelected]);
    }

    #[test]
    fn test_granted_feat_is_not_a_duplicate() {
        let resolver = EligibilityResolver::new();
        let feat = FeatDefinition::new("shield-block", "Shield Block", 1);
        let snapshot = CharacterSnapshot::new(1).with_granted_feat("shield-block");
        assert!(resolver.can_take(&feat, &snapshot));
    }

    #[test]
    fn test_feat_level_ignored_by_default() {
        let resolver = EligibilityResolver::new();
        let feat = FeatDefinition::new("opportunist", "Opportunist", 4);
        let snapshot = CharacterSnapshot::new(1);
        assert!(resolver.can_take(&feat, &snapshot));
        assert!(resolver.check(&feat, &snapshot).is_eligible());
    }

    #[test]
    fn test_level_prerequisite_gates_by_default() {
        let resolver = EligibilityResolver::new();
        let feat = barbarian_dedication().with_prerequisite(Prerequisite::level(2));
        assert!(!resolver.can_take(&feat, &strong(1, 18)));
        assert!(resolver.can_take(&feat, &strong(2, 18)));
    }

    #[test]
    fn test_feat_level_gate_when_enabled() {
        let resolver = EligibilityResolver::new().with_feat_level(true);
        let feat = barbarian_dedication();
        let snapshot = strong(1, 18);
        assert!(!resolver.can_take(&feat, &snapshot));
        assert_eq!(
            resolver.check(&feat, &snapshot).failures,
            vec![Ineligibility::LevelTooLow {
                required: 2,
                actual: 1
            }]
        );
    }

    #[test]
    fn test_unresolved_choices_only_when_enabled() {
        let feat = barbarian_dedication();
        let snapshot = strong(4, 16).with_unresolved_choice("skill-training");

        assert!(EligibilityResolver::new().can_take(&feat, &snapshot));

        let strict = EligibilityResolver::new().with_resolved_choices(true);
        assert!(!strict.can_take(&feat, &snapshot));
        assert_eq!(
            strict.check(&feat, &snapshot).failures,
            vec![Ineligibility::UnresolvedChoices(vec!["skill-training".into()])]
        );
    }

    #[test]
    fn test_from_config() {
        let mut config = RulesConfig::default();
        config.eligibility.require_resolved_choices = true;
        let resolver = EligibilityResolver::from_config(&config);
        assert!(resolver.requires_resolved_choices());
        assert!(!resolver.enforces_feat_level());

        config.eligibility.enforce_feat_level = true;
        assert!(EligibilityResolver::from_config(&config).enforces_feat_level());
    }

    #[test]
    fn test_check_collects_every_failure() {
        let resolver = EligibilityResolver::new().with_feat_level(true);
        let feat = FeatDefinition::new("medic-dedication", "Medic Dedication", 2)
            .with_prerequisite(Prerequisite::skill("medicine", Comparison::AtLeast, "trained"))
            .with_prerequisite(Prerequisite::feat("battle-medicine"));
        let snapshot = CharacterSnapshot::new(1)
            .with_proficiency("medicine", ProficiencyRank::Untrained)
            .with_feat("medic-dedication");

        let report = resolver.check(&feat, &snapshot);
        assert!(!report.is_eligible());
        assert_eq!(report.failures.len(), 4);
        assert_eq!(report.unmet_prerequisites().count(), 2);
        assert_eq!(report.is_eligible(), resolver.can_take(&feat, &snapshot));
    }

    #[test]
    fn test_archetype_prerequisites_only() {
        let resolver = EligibilityResolver::new();
        let medic = ArchetypeDefinition::new("medic", "Medic", "medic-dedication").with_prerequisite(
            Prerequisite::skill("medicine", Comparison::AtLeast, "Trained"),
        );
        let expert = CharacterSnapshot::new(1).with_proficiency("medicine", ProficiencyRank::Expert);
        let untrained =
            CharacterSnapshot::new(1).with_proficiency("medicine", ProficiencyRank::Untrained);

        assert!(resolver.validate_archetype(&medic, &expert));
        assert!(!resolver.validate_archetype(&medic, &untrained));

        // Entering the archetype also excludes characters already dedicated
        assert!(resolver.can_take(&medic, &expert));
        assert!(!resolver.can_take(&medic, &expert.clone().with_feat("medic-dedication")));
    }
}
