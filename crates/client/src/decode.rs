//! Fallible decoding of list payloads.
//!
//! List endpoints are decoded from a raw [`serde_json::Value`] so that a
//! payload of the wrong shape becomes a [`ClientError::Decode`] the views turn
//! into an empty list, instead of a panic or a half-filled list.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;

/// Decode a JSON array into `Vec<T>`.
///
/// Anything that is not an array, or an array containing an element that
/// does not decode, is an error. Partial results are never returned.
pub fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, ClientError> {
    match value {
        Value::Array(_) => {
            serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
        }
        other => Err(ClientError::Decode(format!(
            "expected a JSON array, got {}",
            kind(&other)
        ))),
    }
}

/// Decode the array inside a `{ "data": [...] }` envelope.
pub fn decode_data_list<T: DeserializeOwned>(mut value: Value) -> Result<Vec<T>, ClientError> {
    match value.get_mut("data") {
        Some(data) => decode_list(data.take()),
        None => Err(ClientError::Decode("missing `data` field".into())),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
