//! Payload decoding for lookup responses.
//!
//! Responses are JSON objects keyed by the command's resource name
//! (`Years`, `Makes`, `Models`, `Trims`). The provider wraps them in a
//! JSONP callback when one is requested, so the wrapper is stripped first.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::LookupCommand;
use crate::error::LookupFailure;
use crate::models::{MakeRecord, ModelRecord, SpecRecord, YearRange, number_from_value};

/// Removes a `callback( ... );` wrapper, returning the inner JSON text.
///
/// Bodies that already start with `{` or `[` are returned trimmed.
#[must_use]
pub fn strip_jsonp(body: &str) -> &str {
    let trimmed = body.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return trimmed;
    }
    let (Some(open), Some(close)) = (trimmed.find('('), trimmed.rfind(')')) else {
        return trimmed;
    };
    let callback = &trimmed[..open];
    let is_callback = callback
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.' | '?'));
    if !is_callback || close <= open {
        return trimmed;
    }
    trimmed[open + 1..close].trim()
}

/// Parses `body` and extracts the value under the command's resource key.
fn payload(command: LookupCommand, body: &str) -> Result<Value, LookupFailure> {
    let json = strip_jsonp(body);
    let mut value: Value = serde_json::from_str(json)
        .map_err(|e| LookupFailure::malformed(command, e.to_string()))?;

    let key = command.resource_key();
    if let Some(resource) = value.get_mut(key) {
        return Ok(resource.take());
    }
    let message = value
        .get("error")
        .and_then(Value::as_str)
        .map_or_else(|| format!("missing \"{key}\""), |e| format!("service error: {e}"));
    Err(LookupFailure::malformed(command, message))
}

fn decode_list<T: DeserializeOwned>(
    command: LookupCommand,
    body: &str,
) -> Result<Vec<T>, LookupFailure> {
    let value = payload(command, body)?;
    if !value.is_array() {
        return Err(LookupFailure::malformed(
            command,
            format!("\"{}\" is not a list", command.resource_key()),
        ));
    }
    let records: Vec<T> = serde_json::from_value(value)
        .map_err(|e| LookupFailure::malformed(command, e.to_string()))?;
    if records.is_empty() {
        return Err(LookupFailure::Empty { command });
    }
    Ok(records)
}

/// Decodes a `getYears` response.
///
/// # Errors
///
/// Returns `Malformed` when either bound is missing or not a year and
/// `Empty` when the range is inverted.
pub fn decode_years(body: &str) -> Result<YearRange, LookupFailure> {
    let command = LookupCommand::GetYears;
    let value = payload(command, body)?;
    let bound = |name: &str| {
        value
            .get(name)
            .and_then(number_from_value)
            .filter(|n| n.fract() == 0.0 && (0.0..=f64::from(u16::MAX)).contains(n))
            .map(|n| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let year = n as u16;
                year
            })
            .ok_or_else(|| LookupFailure::malformed(command, format!("invalid {name}")))
    };
    let range = YearRange {
        min_year: bound("min_year")?,
        max_year: bound("max_year")?,
    };
    if range.min_year > range.max_year {
        return Err(LookupFailure::Empty { command });
    }
    Ok(range)
}

/// Decodes a `getMakes` response, preserving provider order.
///
/// # Errors
///
/// Returns `Malformed` for an unexpected shape and `Empty` for no makes.
pub fn decode_makes(body: &str) -> Result<Vec<MakeRecord>, LookupFailure> {
    decode_list(LookupCommand::GetMakes, body)
}

/// Decodes a `getModels` response.
///
/// # Errors
///
/// Returns `Malformed` for an unexpected shape and `Empty` for no models.
pub fn decode_models(body: &str) -> Result<Vec<ModelRecord>, LookupFailure> {
    decode_list(LookupCommand::GetModels, body)
}

/// Decodes a `getTrims` response.
///
/// # Errors
///
/// Returns `Malformed` for an unexpected shape and `Empty` for no trims.
pub fn decode_trims(body: &str) -> Result<Vec<SpecRecord>, LookupFailure> {
    decode_list(LookupCommand::GetTrims, body)
}
