//! Rule content - Feat, archetype and class definitions and their registry
//!
//! Content is loaded once and is immutable afterwards. [`bundled`] parses the
//! content pack compiled into the crate on first use; concurrent first
//! callers block until that single parse completes.

mod archetype;
mod class;
mod feat;

pub use archetype::{ArchetypeDefinition, CastingKind, SlotGrant, SpellcastingProgression, Tradition};
pub use class::{ClassDefinition, ClassGrant};
pub use feat::FeatDefinition;

use crate::config::{self, ConfigError, ContentFiles, RulesConfig};
use crate::error::RulesError;
use crate::prerequisite::Prerequisite;
use crate::types::{ArchetypeId, ClassId, FeatId};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Anything a character can select that is gated by prerequisites
pub trait Selectable: Send + Sync {
    /// The feat id recorded on the character once selected
    fn selection_id(&self) -> &FeatId;

    /// Prerequisites that must all hold
    fn prerequisites(&self) -> &[Prerequisite];

    /// Minimum character level. Default is 1.
    fn level(&self) -> u32 {
        1
    }
}

/// Registry of all loaded rule content
#[derive(Debug, Clone, Default)]
pub struct RulesContent {
    feats: BTreeMap<FeatId, FeatDefinition>,
    archetypes: BTreeMap<ArchetypeId, ArchetypeDefinition>,
    classes: BTreeMap<ClassId, ClassDefinition>,
}

impl RulesContent {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a feat. Ids must be unique.
    pub fn add_feat(&mut self, feat: FeatDefinition) -> Result<(), ConfigError> {
        if self.feats.contains_key(&feat.id) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate feat id '{}'",
                feat.id
            )));
        }
        self.feats.insert(feat.id.clone(), feat);
        Ok(())
    }

    /// Register an archetype. Ids must be unique.
    pub fn add_archetype(&mut self, archetype: ArchetypeDefinition) -> Result<(), ConfigError> {
        if self.archetypes.contains_key(&archetype.id) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate archetype id '{}'",
                archetype.id
            )));
        }
        self.archetypes.insert(archetype.id.clone(), archetype);
        Ok(())
    }

    /// Register a class. Ids must be unique.
    pub fn add_class(&mut self, class: ClassDefinition) -> Result<(), ConfigError> {
        if self.classes.contains_key(&class.id) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate class id '{}'",
                class.id
            )));
        }
        self.classes.insert(class.id.clone(), class);
        Ok(())
    }

    /// Build a validated registry from parsed content files
    pub fn from_files(files: ContentFiles, settings: &RulesConfig) -> Result<Self, ConfigError> {
        let mut content = RulesContent::new();
        for feat in files.feats {
            content.add_feat(feat)?;
        }
        for archetype in files.archetypes {
            content.add_archetype(archetype)?;
        }
        for class in files.classes {
            content.add_class(class)?;
        }
        content.validate(settings)?;

        tracing::info!(
            feats = content.feats.len(),
            archetypes = content.archetypes.len(),
            classes = content.classes.len(),
            "rule content loaded"
        );
        Ok(content)
    }

    /// Cross-reference checks. Hard errors for structural problems; warnings
    /// for prerequisites the evaluator will treat leniently or strictly.
    pub fn validate(&self, settings: &RulesConfig) -> Result<(), ConfigError> {
        for archetype in self.archetypes.values() {
            archetype.validate().map_err(ConfigError::ValidationError)?;
            for feat in &archetype.feats {
                if !self.feats.contains_key(feat) {
                    return Err(ConfigError::ValidationError(format!(
                        "archetype '{}' lists unknown feat '{}'",
                        archetype.id, feat
                    )));
                }
            }
            warn_prerequisites(archetype.id.as_str(), &archetype.prerequisites);
        }

        for class in self.classes.values() {
            class.validate(settings.levels.max_level)?;
            for grant in &class.granted_feats {
                if !self.feats.contains_key(&grant.feat) {
                    return Err(ConfigError::ValidationError(format!(
                        "class '{}' grants unknown feat '{}'",
                        class.id, grant.feat
                    )));
                }
            }
        }

        for feat in self.feats.values() {
            if feat.level > settings.levels.max_level {
                return Err(ConfigError::ValidationError(format!(
                    "feat '{}' has level {}, above the maximum of {}",
                    feat.id, feat.level, settings.levels.max_level
                )));
            }
            warn_prerequisites(feat.id.as_str(), &feat.prerequisites);
            for prereq in &feat.prerequisites {
                if let Prerequisite::Feat { target } = prereq {
                    if !self.feats.contains_key(target) {
                        tracing::warn!(
                            feat = %feat.id,
                            requires = %target,
                            "prerequisite names a feat that is not in this content"
                        );
                    }
                }
            }
        }
        Ok(())
    }

    pub fn feat(&self, id: &str) -> Option<&FeatDefinition> {
        self.feats.get(id)
    }

    pub fn archetype(&self, id: &str) -> Option<&ArchetypeDefinition> {
        self.archetypes.get(id)
    }

    pub fn class(&self, id: &str) -> Option<&ClassDefinition> {
        self.classes.get(id)
    }

    pub fn require_feat(&self, id: &str) -> Result<&FeatDefinition, RulesError> {
        self.feat(id)
            .ok_or_else(|| RulesError::UnknownFeat(id.into()))
    }

    pub fn require_archetype(&self, id: &str) -> Result<&ArchetypeDefinition, RulesError> {
        self.archetype(id)
            .ok_or_else(|| RulesError::UnknownArchetype(id.into()))
    }

    pub fn require_class(&self, id: &str) -> Result<&ClassDefinition, RulesError> {
        self.class(id)
            .ok_or_else(|| RulesError::UnknownClass(id.into()))
    }

    /// All feats, ordered by id
    pub fn feats(&self) -> impl Iterator<Item = &FeatDefinition> {
        self.feats.values()
    }

    /// All archetypes, ordered by id
    pub fn archetypes(&self) -> impl Iterator<Item = &ArchetypeDefinition> {
        self.archetypes.values()
    }

    /// All classes, ordered by id
    pub fn classes(&self) -> impl Iterator<Item = &ClassDefinition> {
        self.classes.values()
    }
}

fn warn_prerequisites(owner: &str, prereqs: &[Prerequisite]) {
    for warning in prereqs.iter().flat_map(Prerequisite::content_warnings) {
        tracing::warn!(owner, "{}", warning);
    }
}

static BUNDLED: OnceLock<Result<RulesContent, ConfigError>> = OnceLock::new();

/// The content pack compiled into this crate, parsed at most once
pub fn bundled() -> Result<&'static RulesContent, &'static ConfigError> {
    BUNDLED
        .get_or_init(|| {
            tracing::debug!("parsing bundled rule content");
            config::parse_content(
                include_str!("../../data/feats.toml"),
                include_str!("../../data/archetypes.toml"),
                include_str!("../../data/classes.toml"),
                &RulesConfig::default(),
            )
        })
        .as_ref()
}
