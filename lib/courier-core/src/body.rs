//! Body serialization.

use bytes::Bytes;

use crate::{Result, Value};

/// Serializes structured request data to its JSON string form.
///
/// Scalars, strings and null pass through unchanged.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use courier_core::{Value, serialize_body};
/// use serde_json::json;
///
/// let body = serialize_body(json!({"a": 1}).into()).expect("serialize");
/// assert_eq!(body, Value::from(r#"{"a":1}"#));
///
/// assert_eq!(serialize_body("plain".into()).expect("serialize"), Value::from("plain"));
/// assert_eq!(serialize_body(Value::Null).expect("serialize"), Value::Null);
/// ```
pub fn serialize_body(data: Value) -> Result<Value> {
    if data.is_object() {
        return data.to_json().map(Value::String);
    }
    Ok(data)
}

/// Wire bytes for request data.
///
/// Null has no body; anything else is sent as its text form.
///
/// # Errors
///
/// Returns an error if a structured value cannot be serialized.
pub fn body_bytes(data: &Value) -> Result<Option<Bytes>> {
    match data {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(Bytes::copy_from_slice(text.as_bytes()))),
        other => other.to_text().map(|text| Some(Bytes::from(text))),
    }
}
