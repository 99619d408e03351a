use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Thresholds for a numerical question, as stored under
/// `problematicValues` / `criticalValues`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deviation: Option<DeviationRule>,
}

impl NumericRules {
    /// Strict decode: fails when no part is usable and at least one part is
    /// malformed.
    pub fn from_value(key: &str, rule_set: &'static str, value: &Value) -> Result<Self, CoreError> {
        let (rules, errors) = Self::decode(key, rule_set, value);
        match errors.into_iter().next() {
            Some(error) if !rules.has_any() => Err(error),
            _ => Ok(rules),
        }
    }

    /// Decode `range` and `deviation` independently. A malformed part is left
    /// out and reported in the returned errors; well-formed parts are kept.
    pub fn decode(key: &str, rule_set: &'static str, value: &Value) -> (Self, Vec<CoreError>) {
        let Value::Object(parts) = value else {
            let error = CoreError::MalformedRules {
                key: key.to_string(),
                rule_set,
                reason: format!("expected an object, got {value}"),
            };
            return (Self::default(), vec![error]);
        };

        let mut errors = Vec::new();
        let rules = Self {
            range: decode_part(parts.get("range"), "range", key, rule_set, &mut errors),
            deviation: decode_part(parts.get("deviation"), "deviation", key, rule_set, &mut errors),
        };
        (rules, errors)
    }

    pub fn has_any(&self) -> bool {
        self.range.is_some() || self.deviation.is_some()
    }
}

fn decode_part<T: DeserializeOwned>(
    part: Option<&Value>,
    name: &str,
    key: &str,
    rule_set: &'static str,
    errors: &mut Vec<CoreError>,
) -> Option<T> {
    let part = part.filter(|value| !value.is_null())?;
    match serde_json::from_value(part.clone()) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            errors.push(CoreError::MalformedRules {
                key: key.to_string(),
                rule_set,
                reason: format!("{name}: {e}"),
            });
            None
        }
    }
}

/// Inclusive bounds. A value that falls inside the bounds is the flagged
/// condition; a rule without either bound never matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl RangeRule {
    pub fn matches(&self, value: f64) -> bool {
        if self.min.is_none() && self.max.is_none() {
            return false;
        }
        let meets_min = self.min.is_none_or(|min| value >= min);
        let meets_max = self.max.is_none_or(|max| value <= max);
        meets_min && meets_max
    }
}

/// Percentage change limits relative to a baseline answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviationRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub increase_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decrease_percent: Option<f64>,
}

/// Flagged option values for a single-choice question.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChoiceRules {
    pub flagged: Vec<Value>,
}

impl ChoiceRules {
    pub fn from_value(key: &str, rule_set: &'static str, value: &Value) -> Result<Self, CoreError> {
        match value {
            Value::Array(items) => Ok(Self {
                flagged: items.clone(),
            }),
            other => Err(CoreError::MalformedRules {
                key: key.to_string(),
                rule_set,
                reason: format!("expected an array of option values, got {other}"),
            }),
        }
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.flagged.iter().any(|flagged| same_value(flagged, value))
    }
}

/// JSON equality that treats `1` and `1.0` as the same option.
fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}
