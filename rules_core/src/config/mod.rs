//! Configuration and content loading from TOML/JSON files

mod content;
mod settings;

pub use content::{
    load_content_dir, parse_archetypes, parse_classes, parse_content, parse_feats, ContentFiles,
};
pub use settings::{EligibilityConstants, LevelConstants, ProficiencyConstants, RulesConfig};

use crate::proficiency::ProgressionError;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid progression table: {0}")]
    ProgressionError(#[from] ProgressionError),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load a JSON or TOML file, chosen by extension (anything but `.json` is read as TOML)
pub fn load_document<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    } else {
        load_toml(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::CharacterSnapshot;
    use std::io::Write;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("rules_core_{}_{}", std::process::id(), name));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_document_by_extension() {
        let json = temp_file("snapshot.json", r#"{"level": 5, "selected_feats": ["toughness"]}"#);
        let toml = temp_file("snapshot.toml", "level = 7\n");

        let from_json: CharacterSnapshot = load_document(&json).unwrap();
        let from_toml: CharacterSnapshot = load_document(&toml).unwrap();
        assert_eq!(from_json.level, 5);
        assert!(from_json.has_selected(&"toughness".into()));
        assert_eq!(from_toml.level, 7);

        let _ = fs::remove_file(json);
        let _ = fs::remove_file(toml);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result: Result<CharacterSnapshot, _> =
            load_document(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
