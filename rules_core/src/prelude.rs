//! Prelude module for convenient imports
//!
//! ```rust
//! use rules_core::prelude::*;
//! ```

// Core types
pub use crate::snapshot::CharacterSnapshot;
pub use crate::types::{Ability, ArchetypeId, ClassId, FeatId, TrackId};

// Progression
pub use crate::proficiency::{ProficiencyRank, ProgressionTable};

// Prerequisites and effects
pub use crate::effect::{EffectKind, EffectValue, FeatEffect};
pub use crate::prerequisite::{Comparison, Prerequisite};

// Eligibility
pub use crate::archetype::ArchetypeProgression;
pub use crate::eligibility::{EligibilityReport, EligibilityResolver};

// Content
pub use crate::content::{bundled, ArchetypeDefinition, ClassDefinition, FeatDefinition, RulesContent, Selectable};
pub use crate::config::RulesConfig;
