//! Response envelope handling.
//!
//! The backend answers either `{"data": <payload>, ...}` or the bare payload.
//! A falsy `data` (null, false, 0, "") means the whole body is the payload.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::types::errors::ApiError;

/// Parses a raw response body and extracts the payload.
///
/// Empty bodies decode as `null`.
pub fn payload(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    let value: Value = serde_json::from_slice(body)?;
    Ok(extract(value))
}

/// Returns `data` when it is present and truthy, otherwise the value itself.
pub fn extract(value: Value) -> Value {
    match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !is_falsy(&data) => data,
            Some(data) => {
                map.insert("data".to_string(), data);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Decodes the payload of a response body into `T`.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    Ok(serde_json::from_value(payload(body)?)?)
}

/// Decodes a list payload.
///
/// `null` and an envelope whose `data` is `null` are both an empty list.
pub fn decode_list<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, ApiError> {
    match payload(body)? {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) if map.get("data").map(Value::is_null).unwrap_or(false) => {
            Ok(Vec::new())
        }
        other => Ok(serde_json::from_value(other)?),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
