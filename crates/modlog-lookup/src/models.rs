//! Records returned by the lookup service.
//!
//! The provider encodes most values as strings and uses `""` or `null` for
//! unknown attributes, so numeric and flag fields are decoded leniently:
//! anything that does not read as a number is treated as absent.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Inclusive range of valid model years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    /// Oldest model year.
    pub min_year: u16,
    /// Newest model year.
    pub max_year: u16,
}

/// A manufacturer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakeRecord {
    /// Provider identifier, e.g. `alfa-romeo`.
    #[serde(deserialize_with = "lenient_string")]
    pub make_id: String,
    /// Display name, e.g. `Alfa Romeo`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub make_display: String,
    /// Whether the provider flags this make as common.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub make_is_common: bool,
    /// Country of origin.
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub make_country: Option<String>,
}

/// A model of a make.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Model name; also its identifier.
    #[serde(deserialize_with = "lenient_string")]
    pub model_name: String,
    /// Owning make identifier.
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub model_make_id: Option<String>,
}

/// Trim-level specification record. Read-only; never mutated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecRecord {
    /// Provider identifier of this trim.
    #[serde(deserialize_with = "lenient_string")]
    pub model_id: String,
    /// Model year.
    #[serde(default, deserialize_with = "lenient_string")]
    pub model_year: String,
    /// Make display name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub model_make_display: String,
    /// Model name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub model_name: String,
    /// Trim name.
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub model_trim: Option<String>,
    /// Engine power in PS.
    #[serde(default, deserialize_with = "lenient_number")]
    pub model_engine_power_ps: Option<f64>,
    /// Engine torque in Nm.
    #[serde(default, deserialize_with = "lenient_number")]
    pub model_engine_torque_nm: Option<f64>,
    /// Curb weight in kg.
    #[serde(default, deserialize_with = "lenient_number")]
    pub model_weight_kg: Option<f64>,
    /// Displacement in cc.
    #[serde(default, deserialize_with = "lenient_number")]
    pub model_engine_cc: Option<f64>,
    /// Free-text drivetrain description, e.g. `Front Wheel Drive`.
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub model_drive: Option<String>,
    /// Every other raw attribute, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SpecRecord {
    /// Creates a record carrying only identity fields.
    #[must_use]
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            model_year: String::new(),
            model_make_display: String::new(),
            model_name: String::new(),
            model_trim: None,
            model_engine_power_ps: None,
            model_engine_torque_nm: None,
            model_weight_kg: None,
            model_engine_cc: None,
            model_drive: None,
            extra: Map::new(),
        }
    }

    /// Make display name, falling back to a raw `make_display` attribute
    /// when `model_make_display` is blank.
    #[must_use]
    pub fn make_name(&self) -> &str {
        if !self.model_make_display.is_empty() {
            return &self.model_make_display;
        }
        self.extra
            .get("make_display")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

/// Reads a JSON number or numeric string.
pub(crate) fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn string_from_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(string_from_value))
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    lenient_opt_string(deserializer).map(Option::unwrap_or_default)
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(other) => number_from_value(&other).is_some_and(|n| (n - 1.0).abs() < f64::EPSILON),
        None => false,
    })
}
