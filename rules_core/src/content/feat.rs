//! FeatDefinition - A feat as authored in rule content

use super::Selectable;
use crate::effect::FeatEffect;
use crate::prerequisite::Prerequisite;
use crate::types::FeatId;
use serde::{Deserialize, Serialize};

/// A feat, read-only after load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatDefinition {
    /// Unique feat identifier
    pub id: FeatId,
    /// Display name
    pub name: String,
    /// Minimum character level to take the feat
    #[serde(default = "default_feat_level")]
    pub level: u32,
    /// Traits (e.g. "archetype", "dedication", "general", "skill")
    #[serde(default)]
    pub traits: Vec<String>,
    /// All must hold for the feat to be taken
    #[serde(default)]
    pub prerequisites: Vec<Prerequisite>,
    /// Alternative prerequisite text for display only; not evaluated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative: Option<String>,
    /// Mechanical effects, in application order
    #[serde(default)]
    pub effects: Vec<FeatEffect>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

fn default_feat_level() -> u32 {
    1
}

impl FeatDefinition {
    pub fn new(id: impl Into<FeatId>, name: impl Into<String>, level: u32) -> Self {
        FeatDefinition {
            id: id.into(),
            name: name.into(),
            level,
            traits: Vec::new(),
            prerequisites: Vec::new(),
            alternative: None,
            effects: Vec::new(),
            description: String::new(),
        }
    }

    pub fn with_trait(mut self, name: impl Into<String>) -> Self {
        self.traits.push(name.into());
        self
    }

    pub fn with_prerequisite(mut self, prereq: Prerequisite) -> Self {
        self.prerequisites.push(prereq);
        self
    }

    pub fn with_alternative(mut self, text: impl Into<String>) -> Self {
        self.alternative = Some(text.into());
        self
    }

    pub fn with_effect(mut self, effect: FeatEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.iter().any(|t| t.eq_ignore_ascii_case(name))
    }

    pub fn is_dedication(&self) -> bool {
        self.has_trait("dedication")
    }
}

impl Selectable for FeatDefinition {
    fn selection_id(&self) -> &FeatId {
        &self.id
    }

    fn prerequisites(&self) -> &[Prerequisite] {
        &self.prerequisites
    }

    fn level(&self) -> u32 {
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::EffectKind;
    use crate::prerequisite::Comparison;

    #[test]
    fn test_parse_feat() {
        let toml = r#"
id = "fighter-dedication"
name = "Fighter Dedication"
level = 2
traits = ["Archetype", "Dedication", "Multiclass"]
alternative = "Dexterity 14"

[[prerequisites]]
type = "ability_score"
target = "strength"
operator = ">="
value = 14

[[effects]]
type = "modifier"
target = "proficiency:martial_weapons"
value = "trained"
"#;
        let feat: FeatDefinition = toml::from_str(toml).unwrap();
        assert_eq!(feat.id.as_str(), "fighter-dedication");
        assert_eq!(feat.level, 2);
        assert!(feat.is_dedication());
        assert_eq!(feat.alternative.as_deref(), Some("Dexterity 14"));
        assert_eq!(feat.prerequisites.len(), 1);
        assert_eq!(feat.effects[0].kind(), EffectKind::Modifier);
    }

    #[test]
    fn test_defaults() {
        let feat: FeatDefinition = toml::from_str("id = \"toughness\"\nname = \"Toughness\"").unwrap();
        assert_eq!(feat.level, 1);
        assert!(feat.prerequisites.is_empty());
        assert!(feat.effects.is_empty());
    }

    #[test]
    fn test_builder() {
        let feat = FeatDefinition::new("power-attack", "Power Attack", 1)
            .with_trait("fighter")
            .with_prerequisite(Prerequisite::ability(
                crate::types::Ability::Strength,
                Comparison::AtLeast,
                12,
            ));
        assert!(feat.has_trait("Fighter"));
        assert_eq!(feat.selection_id().as_str(), "power-attack");
        assert_eq!(Selectable::level(&feat), 1);
    }
}
