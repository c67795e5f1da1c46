//! Canonical comparison keys for badge rules.

use crate::record::{BadgeRecord, CriteriaValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest magnitude at which an `f64` still holds every integer exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// How criteria values are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuePolicy {
    /// Compare the stored representation verbatim. `5` and `"5"` differ.
    #[default]
    Exact,
    /// Text that parses as a finite number compares equal to that number,
    /// and integral numbers compare equal regardless of a fractional part.
    Numeric,
}

impl fmt::Display for ValuePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::Numeric => f.write_str("numeric"),
        }
    }
}

impl std::str::FromStr for ValuePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(Self::Exact),
            "numeric" => Ok(Self::Numeric),
            other => Err(format!(
                "unknown value policy '{other}', expected 'exact' or 'numeric'"
            )),
        }
    }
}

/// Value half of a canonical key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CanonicalValue {
    /// Numeric threshold in its canonical text form.
    Number(String),
    /// Text threshold.
    Text(String),
}

/// Identity of one badge rule. Two records collide iff their keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CanonicalKey {
    /// Criteria type, compared verbatim.
    pub criteria_type: String,
    /// Canonical threshold.
    pub value: CanonicalValue,
}

impl CanonicalKey {
    /// Single comparison token, e.g. `streak=5` or `streak="5"`.
    pub fn token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            CanonicalValue::Number(n) => write!(f, "{}={n}", self.criteria_type),
            CanonicalValue::Text(s) => write!(f, "{}={s:?}", self.criteria_type),
        }
    }
}

/// Derive the canonical key of a record.
///
/// Depends only on the criteria type and value. Records are validated at
/// construction, so both fields are always present here.
pub fn normalize(record: &BadgeRecord, policy: ValuePolicy) -> CanonicalKey {
    let value = match (&record.criteria_value, policy) {
        (CriteriaValue::Number(n), ValuePolicy::Exact) => CanonicalValue::Number(n.to_string()),
        (CriteriaValue::Text(s), ValuePolicy::Exact) => CanonicalValue::Text(s.clone()),
        (CriteriaValue::Number(n), ValuePolicy::Numeric) => {
            let text = n.to_string();
            CanonicalValue::Number(coerce_numeric(&text).unwrap_or(text))
        }
        (CriteriaValue::Text(s), ValuePolicy::Numeric) => match coerce_numeric(s) {
            Some(n) => CanonicalValue::Number(n),
            None => CanonicalValue::Text(s.clone()),
        },
    };

    CanonicalKey {
        criteria_type: record.criteria_type.clone(),
        value,
    }
}

fn coerce_numeric(text: &str) -> Option<String> {
    let text = text.trim();
    // Integer text keeps full precision; only fractional forms go through f64.
    if let Ok(integer) = text.parse::<i64>() {
        return Some(integer.to_string());
    }
    if let Ok(integer) = text.parse::<u64>() {
        return Some(integer.to_string());
    }
    let parsed: f64 = text.parse().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    if parsed.fract() == 0.0 && parsed.abs() < MAX_EXACT_INTEGER {
        #[allow(clippy::cast_possible_truncation)]
        let integer = parsed as i64;
        return Some(integer.to_string());
    }
    Some(parsed.to_string())
}
