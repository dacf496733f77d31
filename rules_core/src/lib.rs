//! rules_core - Rules resolution engine for tabletop character builds
//!
//! This library provides:
//! - ProgressionTable: Level to proficiency rank, per track
//! - Prerequisite: Typed conditions evaluated against a CharacterSnapshot
//! - FeatEffect: Declarative mechanical deltas, kept in authored order
//! - EligibilityResolver: Whether a character may take a feat or archetype
//! - ArchetypeProgression: Archetype feat lists filtered by eligibility

pub mod archetype;
pub mod config;
pub mod content;
pub mod effect;
pub mod eligibility;
pub mod error;
pub mod prelude;
pub mod prerequisite;
pub mod proficiency;
pub mod snapshot;
pub mod types;

// Re-export core types for convenience
pub use archetype::ArchetypeProgression;
pub use config::{ConfigError, RulesConfig};
pub use content::{
    bundled, ArchetypeDefinition, ClassDefinition, FeatDefinition, RulesContent, Selectable,
    SpellcastingProgression,
};
pub use effect::{EffectKind, EffectValue, FeatEffect};
pub use eligibility::{EligibilityReport, EligibilityResolver, Ineligibility};
pub use error::RulesError;
pub use prerequisite::{evaluate, evaluate_all, unmet_prerequisites, Comparison, Prerequisite};
pub use proficiency::{ProficiencyRank, ProgressionError, ProgressionStep, ProgressionTable};
pub use snapshot::CharacterSnapshot;
pub use types::{Ability, ArchetypeId, ClassId, FeatId, TrackId};
