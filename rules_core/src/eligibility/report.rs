//! Eligibility results with the reasons a selection is blocked

use crate::prerequisite::Prerequisite;
use crate::types::FeatId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One reason a character cannot take a feat or archetype
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum Ineligibility {
    UnmetPrerequisite(Prerequisite),
    LevelTooLow { required: u32, actual: u32 },
    AlreadySelected,
    UnresolvedChoices(Vec<FeatId>),
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ineligibility::UnmetPrerequisite(prereq) => write!(f, "requires {}", prereq),
            Ineligibility::LevelTooLow { required, actual } => {
                write!(f, "requires level {} (character is level {})", required, actual)
            }
            Ineligibility::AlreadySelected => f.write_str("already selected"),
            Ineligibility::UnresolvedChoices(feats) => {
                let names: Vec<&str> = feats.iter().map(FeatId::as_str).collect();
                write!(f, "unresolved choices on {}", names.join(", "))
            }
        }
    }
}

/// Full eligibility result for one feat or archetype
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityReport {
    /// The feat id that would be selected
    pub feat: FeatId,
    /// Empty when eligible
    pub failures: Vec<Ineligibility>,
}

impl EligibilityReport {
    pub fn is_eligible(&self) -> bool {
        self.failures.is_empty()
    }

    /// Just the failed prerequisites, in declaration order
    pub fn unmet_prerequisites(&self) -> impl Iterator<Item = &Prerequisite> {
        self.failures.iter().filter_map(|failure| match failure {
            Ineligibility::UnmetPrerequisite(prereq) => Some(prereq),
            _ => None,
        })
    }
}

impl fmt::Display for EligibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eligible() {
            return write!(f, "{}: eligible", self.feat);
        }
        write!(f, "{}: not eligible", self.feat)?;
        for failure in &self.failures {
            write!(f, "\n  - {}", failure)?;
        }
        Ok(())
    }
}
