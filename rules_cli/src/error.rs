use rules_core::{ConfigError, RulesError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error("bundled rule content failed to load: {0}")]
    Bundled(&'static ConfigError),
    #[error("level {level} is outside 1..={max}")]
    LevelOutOfRange { level: u32, max: u32 },
}
