//! EffectValue - The small value language used by effects

use serde::{Deserialize, Serialize};
use std::fmt;

/// An effect's value expression.
///
/// - `Literal`: a plain number ("5", or a bare integer in content)
/// - `Delta`: a signed change ("+5", "-1")
/// - `Symbolic`: anything else ("level", "9 + dying_value"), resolved by the consumer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEffectValue", into = "String")]
pub enum EffectValue {
    Literal(i64),
    Delta(i64),
    Symbolic(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEffectValue {
    Integer(i64),
    Text(String),
}

impl From<RawEffectValue> for EffectValue {
    fn from(raw: RawEffectValue) -> Self {
        match raw {
            RawEffectValue::Integer(n) => EffectValue::Literal(n),
            RawEffectValue::Text(text) => EffectValue::parse(&text),
        }
    }
}

impl EffectValue {
    /// Classify a value expression. Never fails; unrecognized text is symbolic.
    pub fn parse(text: &str) -> EffectValue {
        let text = text.trim();
        if text.starts_with(['+', '-']) {
            if let Ok(n) = text.parse::<i64>() {
                return EffectValue::Delta(n);
            }
        } else if let Ok(n) = text.parse::<i64>() {
            return EffectValue::Literal(n);
        }
        EffectValue::Symbolic(text.to_string())
    }

    /// The number carried by literal and delta values
    pub fn as_number(&self) -> Option<i64> {
        match self {
            EffectValue::Literal(n) | EffectValue::Delta(n) => Some(*n),
            EffectValue::Symbolic(_) => None,
        }
    }

    /// Apply to a base value: literals replace it, deltas adjust it.
    /// Symbolic values need the consumer's bindings and return None.
    pub fn apply_to(&self, base: i64) -> Option<i64> {
        match self {
            EffectValue::Literal(n) => Some(*n),
            EffectValue::Delta(n) => Some(base + n),
            EffectValue::Symbolic(_) => None,
        }
    }

    pub fn is_symbolic(&self) -> bool {
        matches!(self, EffectValue::Symbolic(_))
    }
}

impl fmt::Display for EffectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectValue::Literal(n) => write!(f, "{}", n),
            EffectValue::Delta(n) => write!(f, "{:+}", n),
            EffectValue::Symbolic(expr) => f.write_str(expr),
        }
    }
}

impl From<EffectValue> for String {
    fn from(value: EffectValue) -> Self {
        value.to_string()
    }
}

impl From<i64> for EffectValue {
    fn from(n: i64) -> Self {
        EffectValue::Literal(n)
    }
}

impl From<i32> for EffectValue {
    fn from(n: i32) -> Self {
        EffectValue::Literal(n.into())
    }
}

impl From<&str> for EffectValue {
    fn from(text: &str) -> Self {
        EffectValue::parse(text)
    }
}
