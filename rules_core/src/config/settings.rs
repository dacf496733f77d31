//! Tunable rules settings

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rules engine settings, loadable from TOML. Every field has a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub levels: LevelConstants,
    #[serde(default)]
    pub proficiency: ProficiencyConstants,
    #[serde(default)]
    pub eligibility: EligibilityConstants,
}

impl RulesConfig {
    /// Load settings from a TOML file and validate them
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: RulesConfig = super::load_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no character could satisfy
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.max_level == 0 {
            return Err(ConfigError::ValidationError(
                "levels.max_level must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConstants {
    /// Highest character level; progression steps above it are rejected
    #[serde(default = "default_max_level")]
    pub max_level: u32,
}

impl Default for LevelConstants {
    fn default() -> Self {
        LevelConstants {
            max_level: default_max_level(),
        }
    }
}

fn default_max_level() -> u32 {
    20
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProficiencyConstants {
    /// Trained and better add character level to the proficiency bonus.
    /// Set false for the "proficiency without level" variant.
    #[serde(default = "default_add_level")]
    pub add_level_to_trained: bool,
}

impl Default for ProficiencyConstants {
    fn default() -> Self {
        ProficiencyConstants {
            add_level_to_trained: default_add_level(),
        }
    }
}

fn default_add_level() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EligibilityConstants {
    /// Require the character level to reach each feat's declared level.
    /// Off by default; content states level gates as `level` prerequisites.
    #[serde(default)]
    pub enforce_feat_level: bool,
    /// Block new feats while the character has unresolved feat choices
    #[serde(default)]
    pub require_resolved_choices: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RulesConfig::default();
        assert_eq!(config.levels.max_level, 20);
        assert!(config.proficiency.add_level_to_trained);
        assert!(!config.eligibility.require_resolved_choices);
        assert!(!config.eligibility.enforce_feat_level);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[proficiency]
add_level_to_trained = false

[eligibility]
require_resolved_choices = true
"#;
        let config: RulesConfig = crate::config::parse_toml(toml).unwrap();
        assert_eq!(config.levels.max_level, 20);
        assert!(!config.proficiency.add_level_to_trained);
        assert!(config.eligibility.require_resolved_choices);
    }

    #[test]
    fn test_zero_max_level_rejected() {
        let config: RulesConfig =
            crate::config::parse_toml("[levels]\nmax_level = 0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
        assert!(RulesConfig::default().validate().is_ok());
    }

    #[test]
    fn test_load_validates() {
        let path = std::env::temp_dir().join(format!(
            "rules_core_{}_zero_max_level.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[levels]\nmax_level = 0\n").unwrap();
        let result = RulesConfig::load(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: RulesConfig = crate::config::parse_toml("").unwrap();
        assert_eq!(config, RulesConfig::default());
    }
}
