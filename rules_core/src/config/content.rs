//! Rule content loading (feats, archetypes, classes)

use super::{ConfigError, RulesConfig};
use crate::content::{ArchetypeDefinition, ClassDefinition, FeatDefinition, RulesContent};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for feat definitions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatsConfig {
    #[serde(default)]
    pub feats: Vec<FeatDefinition>,
}

/// Container for archetype definitions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchetypesConfig {
    #[serde(default)]
    pub archetypes: Vec<ArchetypeDefinition>,
}

/// Container for class definitions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassesConfig {
    #[serde(default)]
    pub classes: Vec<ClassDefinition>,
}

/// Parsed but not yet cross-validated content
#[derive(Debug, Clone, Default)]
pub struct ContentFiles {
    pub feats: Vec<FeatDefinition>,
    pub archetypes: Vec<ArchetypeDefinition>,
    pub classes: Vec<ClassDefinition>,
}

/// Parse feat definitions from a TOML string
pub fn parse_feats(content: &str) -> Result<Vec<FeatDefinition>, ConfigError> {
    let config: FeatsConfig = super::parse_toml(content)?;
    Ok(config.feats)
}

/// Parse archetype definitions from a TOML string
pub fn parse_archetypes(content: &str) -> Result<Vec<ArchetypeDefinition>, ConfigError> {
    let config: ArchetypesConfig = super::parse_toml(content)?;
    Ok(config.archetypes)
}

/// Parse class definitions from a TOML string
pub fn parse_classes(content: &str) -> Result<Vec<ClassDefinition>, ConfigError> {
    let config: ClassesConfig = super::parse_toml(content)?;
    Ok(config.classes)
}

/// Parse and validate a full content set from TOML strings
pub fn parse_content(
    feats: &str,
    archetypes: &str,
    classes: &str,
    settings: &RulesConfig,
) -> Result<RulesContent, ConfigError> {
    let files = ContentFiles {
        feats: parse_feats(feats)?,
        archetypes: parse_archetypes(archetypes)?,
        classes: parse_classes(classes)?,
    };
    RulesContent::from_files(files, settings)
}

/// Load `feats.toml`, `archetypes.toml` and `classes.toml` from a directory.
///
/// Missing files count as empty.
pub fn load_content_dir(dir: &Path, settings: &RulesConfig) -> Result<RulesContent, ConfigError> {
    let feats: FeatsConfig = load_optional(&dir.join("feats.toml"))?;
    let archetypes: ArchetypesConfig = load_optional(&dir.join("archetypes.toml"))?;
    let classes: ClassesConfig = load_optional(&dir.join("classes.toml"))?;

    tracing::debug!(dir = %dir.display(), "loading rule content directory");

    RulesContent::from_files(
        ContentFiles {
            feats: feats.feats,
            archetypes: archetypes.archetypes,
            classes: classes.classes,
        },
        settings,
    )
}

fn load_optional<T>(path: &Path) -> Result<T, ConfigError>
where
    T: serde::de::DeserializeOwned + Default,
{
    if path.exists() {
        super::load_toml(path)
    } else {
        tracing::debug!(path = %path.display(), "content file not found, using empty set");
        Ok(T::default())
    }
}
