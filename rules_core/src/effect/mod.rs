//! FeatEffect - Declarative mechanical deltas carried by feats and spells
//!
//! Effects are descriptive data. Applying them to a derived statistics sheet
//! is the job of the consumer; this module only guarantees a typed, ordered
//! form. Effect lists keep declaration order, since consumers apply them as a
//! sequential patch.

mod value;

pub use value::EffectValue;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Structured parameters for multi-value effects (e.g. damage dice by level bracket)
pub type EffectParameters = BTreeMap<String, serde_json::Value>;

/// The kind tag of an effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Modifier,
    Allow,
    Replace,
    Remove,
    Modify,
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EffectKind::Modifier => "modifier",
            EffectKind::Allow => "allow",
            EffectKind::Replace => "replace",
            EffectKind::Remove => "remove",
            EffectKind::Modify => "modify",
        };
        f.write_str(name)
    }
}

/// A single mechanical delta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeatEffect {
    /// Additive/numeric change to a statistic
    Modifier {
        target: String,
        value: EffectValue,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        condition: Option<String>,
    },
    /// Grants a new capability, e.g. enabling an action
    Allow {
        target: String,
        value: EffectValue,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        parameters: EffectParameters,
    },
    /// Replaces an existing value or rule
    Replace {
        target: String,
        value: EffectValue,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        condition: Option<String>,
    },
    /// Removes a value, trait or condition
    Remove {
        target: String,
        value: EffectValue,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        condition: Option<String>,
    },
    /// Alters the behavior of an existing rule
    Modify {
        target: String,
        value: EffectValue,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        parameters: EffectParameters,
    },
}

impl FeatEffect {
    pub fn modifier(target: impl Into<String>, value: impl Into<EffectValue>) -> Self {
        FeatEffect::Modifier {
            target: target.into(),
            value: value.into(),
            condition: None,
        }
    }

    pub fn allow(target: impl Into<String>, value: impl Into<EffectValue>) -> Self {
        FeatEffect::Allow {
            target: target.into(),
            value: value.into(),
            parameters: EffectParameters::new(),
        }
    }

    /// Attach a condition. No-op for kinds without one (Allow, Modify).
    pub fn when(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            FeatEffect::Modifier { condition, .. }
            | FeatEffect::Replace { condition, .. }
            | FeatEffect::Remove { condition, .. } => *condition = Some(text.into()),
            FeatEffect::Allow { .. } | FeatEffect::Modify { .. } => {}
        }
        self
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            FeatEffect::Modifier { .. } => EffectKind::Modifier,
            FeatEffect::Allow { .. } => EffectKind::Allow,
            FeatEffect::Replace { .. } => EffectKind::Replace,
            FeatEffect::Remove { .. } => EffectKind::Remove,
            FeatEffect::Modify { .. } => EffectKind::Modify,
        }
    }

    /// Name of the field or rule the effect applies to
    pub fn target(&self) -> &str {
        match self {
            FeatEffect::Modifier { target, .. }
            | FeatEffect::Allow { target, .. }
            | FeatEffect::Replace { target, .. }
            | FeatEffect::Remove { target, .. }
            | FeatEffect::Modify { target, .. } => target,
        }
    }

    pub fn value(&self) -> &EffectValue {
        match self {
            FeatEffect::Modifier { value, .. }
            | FeatEffect::Allow { value, .. }
            | FeatEffect::Replace { value, .. }
            | FeatEffect::Remove { value, .. }
            | FeatEffect::Modify { value, .. } => value,
        }
    }

    /// Opaque condition text, evaluated by the consumer
    pub fn condition(&self) -> Option<&str> {
        match self {
            FeatEffect::Modifier { condition, .. }
            | FeatEffect::Replace { condition, .. }
            | FeatEffect::Remove { condition, .. } => condition.as_deref(),
            FeatEffect::Allow { .. } | FeatEffect::Modify { .. } => None,
        }
    }

    /// Structured parameters; None for kinds that carry none
    pub fn parameters(&self) -> Option<&EffectParameters> {
        match self {
            FeatEffect::Allow { parameters, .. } | FeatEffect::Modify { parameters, .. } => {
                Some(parameters)
            }
            _ => None,
        }
    }

    /// Whether the effect applies unconditionally
    pub fn is_unconditional(&self) -> bool {
        self.condition().is_none()
    }
}

impl fmt::Display for FeatEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.kind(), self.target(), self.value())?;
        if let Some(condition) = self.condition() {
            write!(f, " when {}", condition)?;
        }
        Ok(())
    }
}
