//! Value conversion between model and native forms
//!
//! Model values arrive as parsed JSON-like trees ([`serde_json::Value`]).
//! Native values use the same representation: strings, numbers, booleans,
//! arrays for `jarray`, objects for `properties`, and delimited strings for
//! `delimited_string` types.

use serde_json::{Map, Number, Value};
use wda_catalog::{AttributeType, Delimiter, PreferredModelType, TargetPlatform};

/// Why a model value could not be converted
pub(crate) type ConvertError = String;

/// Separators accepted between list items in model strings
const MODEL_SEPARATORS: [char; 2] = [',', ';'];

/// Convert a model value to the native form of `ty` for a server on `platform`
pub(crate) fn to_native(ty: AttributeType, value: &Value, platform: TargetPlatform) -> Result<Value, ConvertError> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    match ty {
        AttributeType::String | AttributeType::Password | AttributeType::Credential => {
            scalar_string(value).map(Value::String)
        }
        AttributeType::Integer => integer(value, true),
        AttributeType::Long => integer(value, false),
        AttributeType::Double => double(value),
        AttributeType::Boolean => Ok(Value::Bool(coerce_bool(value))),
        AttributeType::Delimited(delimiter) => delimited_to_native(delimiter.separator(platform), delimiter, value),
        AttributeType::JArray => list_items(value).map(|items| {
            Value::Array(items.into_iter().map(Value::String).collect())
        }),
        AttributeType::Properties => properties(value).map(Value::Object),
    }
}

/// Convert a native value of `ty` to its model form
///
/// Never fails: values that do not match the declared type are passed
/// through unchanged with a warning.
pub(crate) fn to_model(
    ty: AttributeType,
    preferred: Option<PreferredModelType>,
    value: &Value,
    name: &str,
    platform: TargetPlatform,
) -> Value {
    if value.is_null() {
        return Value::Null;
    }
    let converted = match ty {
        AttributeType::String | AttributeType::Password | AttributeType::Credential => {
            Ok(value.clone())
        }
        AttributeType::Integer => integer(value, true),
        AttributeType::Long => integer(value, false),
        AttributeType::Double => double(value),
        AttributeType::Boolean => Ok(Value::Bool(coerce_bool(value))),
        AttributeType::Delimited(delimiter) => {
            delimited_to_model(delimiter.separator(platform), delimiter, preferred, value)
        }
        AttributeType::JArray => list_items(value).map(|items| match preferred {
            Some(PreferredModelType::DelimitedString) => Value::String(items.join(",")),
            _ => Value::Array(items.into_iter().map(Value::String).collect()),
        }),
        AttributeType::Properties => properties(value).map(Value::Object),
    };
    converted.unwrap_or_else(|reason| {
        tracing::warn!("Passing native value of {} through unconverted: {}", name, reason);
        value.clone()
    })
}

/// Coerce a boolean-ish value
///
/// `true`/`false` in any case and `1`/`0` are recognised; anything else is
/// `false` and logged.
pub(crate) fn coerce_bool(value: &Value) -> bool {
    let parsed = match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(x) if x == 1.0 => Some(true),
            Some(x) if x == 0.0 => Some(false),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    };
    parsed.unwrap_or_else(|| {
        tracing::warn!("Coercing unrecognised boolean value {} to false", value);
        false
    })
}

/// Normalize a delimited model string for a non-space separator
///
/// Items may be separated by `,`, `;` or `sep` in the model; they are
/// trimmed, empty ones dropped, and rejoined with `sep`. Applying it twice
/// equals applying it once.
pub(crate) fn normalize_delimited(text: &str, sep: char) -> String {
    split_model_items(text, sep).join(&sep.to_string())
}

fn split_model_items(text: &str, sep: char) -> Vec<&str> {
    text.split(|c: char| c == sep || MODEL_SEPARATORS.contains(&c))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

fn delimited_to_native(sep: char, delimiter: Delimiter, value: &Value) -> Result<Value, ConvertError> {
    match (delimiter, value) {
        (Delimiter::Space, Value::String(s)) => Ok(Value::String(s.clone())),
        (_, Value::String(s)) => Ok(Value::String(normalize_delimited(s, sep))),
        (_, Value::Array(_)) => list_items(value).map(|items| Value::String(items.join(&sep.to_string()))),
        (_, other) => scalar_string(other).map(Value::String),
    }
}

/// Native strings are split on their own separator only, so items may
/// contain the model separators
fn delimited_to_model(
    sep: char,
    delimiter: Delimiter,
    preferred: Option<PreferredModelType>,
    value: &Value,
) -> Result<Value, ConvertError> {
    let items: Vec<String> = match value {
        Value::String(s) if delimiter == Delimiter::Space => {
            s.split_whitespace().map(str::to_string).collect()
        }
        Value::String(s) => s
            .split(sep)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Array(_) => list_items(value)?,
        other => return Err(format!("expected a delimited string, found {other}")),
    };
    Ok(match preferred {
        Some(PreferredModelType::DelimitedString) => Value::String(items.join(&sep.to_string())),
        _ => Value::Array(items.into_iter().map(Value::String).collect()),
    })
}

fn scalar_string(value: &Value) -> Result<String, ConvertError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(format!("expected a scalar, found {other}")),
    }
}

fn integer(value: &Value, narrow: bool) -> Result<Value, ConvertError> {
    let parsed = match value {
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Some(i),
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 9.0e15 => Some(f as i64),
            _ => None,
        },
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    let number = parsed.ok_or_else(|| format!("expected an integer, found {value}"))?;
    if narrow && i32::try_from(number).is_err() {
        return Err(format!("{number} is out of range for an integer"));
    }
    Ok(Value::Number(Number::from(number)))
}

fn double(value: &Value) -> Result<Value, ConvertError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| format!("expected a number, found {value}"))
}

fn list_items(value: &Value) -> Result<Vec<String>, ConvertError> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| scalar_string(item).map(|s| s.trim().to_string()))
            .collect(),
        Value::String(s) => Ok(split_model_items(s, ',').into_iter().map(str::to_string).collect()),
        other => Err(format!("expected a list, found {other}")),
    }
}

fn properties(value: &Value) -> Result<Map<String, Value>, ConvertError> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| scalar_string(v).map(|s| (k.clone(), Value::String(s))))
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                pair.split_once('=')
                    .map(|(k, v)| (k.trim().to_string(), Value::String(v.trim().to_string())))
                    .ok_or_else(|| format!("'{pair}' is not a key=value pair"))
            })
            .collect(),
        other => Err(format!("expected properties, found {other}")),
    }
}
