//! Prerequisite - Typed conditions a character must meet to take a feat or archetype
//!
//! Content authors write prerequisites as tagged tables:
//!
//! ```toml
//! [[feats.prerequisites]]
//! type = "ability_score"
//! target = "strength"
//! operator = ">="
//! value = 14
//! ```

mod evaluator;

pub use evaluator::{evaluate, evaluate_all, unmet_prerequisites};

use crate::proficiency::ProficiencyRank;
use crate::types::{Ability, FeatId, TrackId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator for score and proficiency thresholds.
///
/// Written as `>=`, `>`, `=`, `<=` or `<` in content. Any other token is
/// rejected when the content is loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    #[default]
    #[serde(rename = ">=")]
    AtLeast,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "=", alias = "==")]
    Equal,
    #[serde(rename = "<=")]
    AtMost,
    #[serde(rename = "<")]
    LessThan,
}

impl Comparison {
    /// Apply the operator as `actual <op> expected`
    pub fn compare(self, actual: i32, expected: i32) -> bool {
        match self {
            Comparison::AtLeast => actual >= expected,
            Comparison::GreaterThan => actual > expected,
            Comparison::Equal => actual == expected,
            Comparison::AtMost => actual <= expected,
            Comparison::LessThan => actual < expected,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::AtLeast => ">=",
            Comparison::GreaterThan => ">",
            Comparison::Equal => "=",
            Comparison::AtMost => "<=",
            Comparison::LessThan => "<",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Threshold value as authored: a number, or text such as "14" or "Trained"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreValue {
    Number(i32),
    Text(String),
}

impl ScoreValue {
    /// Numeric threshold; None when the text does not parse
    pub fn as_score(&self) -> Option<i32> {
        match self {
            ScoreValue::Number(n) => Some(*n),
            ScoreValue::Text(text) => text.trim().parse().ok(),
        }
    }

    /// Threshold on the proficiency scale.
    ///
    /// Rank names map through the rank table, numbers are taken as-is, and
    /// anything else counts as Untrained (0).
    pub fn as_rank_value(&self) -> i32 {
        match self {
            ScoreValue::Number(n) => *n,
            ScoreValue::Text(text) => ProficiencyRank::parse_name(text)
                .map(ProficiencyRank::bonus)
                .or_else(|| text.trim().parse().ok())
                .unwrap_or(ProficiencyRank::Untrained.bonus()),
        }
    }
}

impl From<i32> for ScoreValue {
    fn from(n: i32) -> Self {
        ScoreValue::Number(n)
    }
}

impl From<&str> for ScoreValue {
    fn from(s: &str) -> Self {
        ScoreValue::Text(s.to_string())
    }
}

impl From<ProficiencyRank> for ScoreValue {
    fn from(rank: ProficiencyRank) -> Self {
        ScoreValue::Text(rank.as_str().to_string())
    }
}

impl fmt::Display for ScoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreValue::Number(n) => write!(f, "{}", n),
            ScoreValue::Text(text) => f.write_str(text),
        }
    }
}

/// A condition on a character snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Prerequisite {
    /// Ability score threshold, e.g. Strength >= 14
    AbilityScore {
        target: Ability,
        #[serde(default)]
        operator: Comparison,
        value: ScoreValue,
    },
    /// Proficiency threshold on a skill or track, compared by rank ordinal
    Skill {
        target: TrackId,
        #[serde(default)]
        operator: Comparison,
        value: ScoreValue,
    },
    /// Minimum character level. Level prerequisites always mean "at least";
    /// there is deliberately no operator.
    Level { value: u32 },
    /// The character must already have this feat (chosen or granted)
    Feat { target: FeatId },
    /// Satisfied when any option is satisfied. An empty group is unsatisfied.
    AnyOf { options: Vec<Prerequisite> },
    /// Recorded for display only; always satisfied
    Unconstrained {
        #[serde(default)]
        description: String,
    },
    /// A prerequisite kind this engine does not model yet. Always satisfied,
    /// and reported as a warning when content is loaded.
    #[serde(other)]
    Unrecognized,
}

impl Prerequisite {
    pub fn ability(target: Ability, operator: Comparison, value: impl Into<ScoreValue>) -> Self {
        Prerequisite::AbilityScore {
            target,
            operator,
            value: value.into(),
        }
    }

    pub fn skill(
        target: impl Into<TrackId>,
        operator: Comparison,
        value: impl Into<ScoreValue>,
    ) -> Self {
        Prerequisite::Skill {
            target: target.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn level(value: u32) -> Self {
        Prerequisite::Level { value }
    }

    pub fn feat(target: impl Into<FeatId>) -> Self {
        Prerequisite::Feat {
            target: target.into(),
        }
    }

    pub fn any_of(options: Vec<Prerequisite>) -> Self {
        Prerequisite::AnyOf { options }
    }

    /// Evaluate against a snapshot
    pub fn is_satisfied_by(&self, snapshot: &crate::snapshot::CharacterSnapshot) -> bool {
        evaluate(self, snapshot)
    }

    /// Authoring problems worth reporting at load time. Evaluation still
    /// proceeds with its documented fallbacks.
    pub fn content_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        self.collect_warnings(&mut warnings);
        warnings
    }

    fn collect_warnings(&self, out: &mut Vec<String>) {
        match self {
            Prerequisite::AbilityScore { target, value, .. } => {
                if value.as_score().is_none() {
                    out.push(format!(
                        "{} threshold '{}' is not a number and can never be met",
                        target, value
                    ));
                }
            }
            Prerequisite::Skill { target, value, .. } => {
                if let ScoreValue::Text(text) = value {
                    if ProficiencyRank::parse_name(text).is_none()
                        && text.trim().parse::<i32>().is_err()
                    {
                        out.push(format!(
                            "{} threshold '{}' is not a rank name; treated as untrained",
                            target, text
                        ));
                    }
                }
            }
            Prerequisite::AnyOf { options } => {
                if options.is_empty() {
                    out.push("empty any_of group can never be met".to_string());
                }
                for option in options {
                    option.collect_warnings(out);
                }
            }
            Prerequisite::Unrecognized => {
                out.push("unrecognized prerequisite kind is treated as satisfied".to_string());
            }
            Prerequisite::Level { .. }
            | Prerequisite::Feat { .. }
            | Prerequisite::Unconstrained { .. } => {}
        }
    }
}

impl fmt::Display for Prerequisite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prerequisite::AbilityScore {
                target,
                operator,
                value,
            } => write!(f, "{} {} {}", target, operator, value),
            Prerequisite::Skill {
                target,
                operator,
                value,
            } => match value {
                ScoreValue::Number(n) => match ProficiencyRank::from_bonus(*n) {
                    Some(rank) => write!(f, "{} {} {}", target, operator, rank),
                    None => write!(f, "{} {} {}", target, operator, n),
                },
                ScoreValue::Text(text) => write!(f, "{} {} {}", target, operator, text),
            },
            Prerequisite::Level { value } => write!(f, "level {}", value),
            Prerequisite::Feat { target } => write!(f, "feat {}", target),
            Prerequisite::AnyOf { options } => {
                f.write_str("one of (")?;
                for (i, option) in options.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{}", option)?;
                }
                f.write_str(")")
            }
            Prerequisite::Unconstrained { description } if description.is_empty() => {
                f.write_str("unconstrained")
            }
            Prerequisite::Unconstrained { description } => f.write_str(description),
            Prerequisite::Unrecognized => f.write_str("unrecognized prerequisite"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_tokens() {
        for (token, op) in [
            (">=", Comparison::AtLeast),
            (">", Comparison::GreaterThan),
            ("=", Comparison::Equal),
            ("==", Comparison::Equal),
            ("<=", Comparison::AtMost),
            ("<", Comparison::LessThan),
        ] {
            let parsed: Comparison = serde_json::from_str(&format!("\"{}\"", token)).unwrap();
            assert_eq!(parsed, op);
        }
        assert!(serde_json::from_str::<Comparison>("\"=>\"").is_err());
    }

    #[test]
    fn test_parse_tagged_prerequisites() {
        let toml = r#"
[[prerequisites]]
type = "ability_score"
target = "Strength"
operator = ">="
value = "14"

[[prerequisites]]
type = "skill"
target = "medicine"
value = "Trained"

[[prerequisites]]
type = "level"
value = 4

[[prerequisites]]
type = "feat"
target = "medic-dedication"
"#;
        #[derive(Deserialize)]
        struct Doc {
            prerequisites: Vec<Prerequisite>,
        }

        let doc: Doc = toml::from_str(toml).unwrap();
        assert_eq!(
            doc.prerequisites,
            vec![
                Prerequisite::ability(Ability::Strength, Comparison::AtLeast, "14"),
                Prerequisite::skill("medicine", Comparison::AtLeast, "Trained"),
                Prerequisite::level(4),
                Prerequisite::feat("medic-dedication"),
            ]
        );
    }

    #[test]
    fn test_unknown_operator_rejected_at_load() {
        let json = r#"{"type": "ability_score", "target": "strength", "operator": "~", "value": 14}"#;
        assert!(serde_json::from_str::<Prerequisite>(json).is_err());
    }

    #[test]
    fn test_unknown_kind_parses_as_unrecognized() {
        let json = r#"{"type": "deity", "target": "Pharasma"}"#;
        let prereq: Prerequisite = serde_json::from_str(json).unwrap();
        assert_eq!(prereq, Prerequisite::Unrecognized);
        assert_eq!(prereq.content_warnings().len(), 1);
    }

    #[test]
    fn test_rank_value_table() {
        assert_eq!(ScoreValue::from("Trained").as_rank_value(), 2);
        assert_eq!(ScoreValue::from("legendary").as_rank_value(), 8);
        assert_eq!(ScoreValue::from("6").as_rank_value(), 6);
        assert_eq!(ScoreValue::from("adept").as_rank_value(), 0);
        assert_eq!(ScoreValue::from(4).as_rank_value(), 4);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Prerequisite::ability(Ability::Strength, Comparison::AtLeast, 14).to_string(),
            "Strength >= 14"
        );
        assert_eq!(
            Prerequisite::skill("medicine", Comparison::AtLeast, 2).to_string(),
            "medicine >= trained"
        );
        assert_eq!(
            Prerequisite::any_of(vec![Prerequisite::level(2), Prerequisite::feat("x")]).to_string(),
            "one of (level 2; feat x)"
        );
    }

    #[test]
    fn test_content_warnings() {
        let bad_score = Prerequisite::ability(Ability::Dexterity, Comparison::AtLeast, "fourteen");
        assert_eq!(bad_score.content_warnings().len(), 1);

        let bad_rank = Prerequisite::skill("arcana", Comparison::AtLeast, "adept");
        assert_eq!(bad_rank.content_warnings().len(), 1);

        let nested = Prerequisite::any_of(vec![Prerequisite::Unrecognized, Prerequisite::level(1)]);
        assert_eq!(nested.content_warnings().len(), 1);

        assert!(Prerequisite::level(3).content_warnings().is_empty());
    }
}
