//! Header canonicalization and content type inference.

use indexmap::IndexMap;

use crate::Value;

/// Request headers, kept in insertion order.
pub type Headers = IndexMap<String, String>;

/// Canonical spelling of the content type header.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Content type inferred for structured request data.
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// Collapses case variants of `canonical` into the canonical spelling.
///
/// When several variants exist, the last one in insertion order wins,
/// including over an entry already spelled canonically.
///
/// ```
/// use courier_core::{Headers, normalize_header_name};
///
/// let mut headers = Headers::new();
/// headers.insert("accept".to_string(), "text/html".to_string());
/// normalize_header_name(&mut headers, "Accept");
///
/// assert_eq!(headers.get("Accept").map(String::as_str), Some("text/html"));
/// assert!(!headers.contains_key("accept"));
/// ```
pub fn normalize_header_name(headers: &mut Headers, canonical: &str) {
    let variants: Vec<String> = headers
        .keys()
        .filter(|name| name.as_str() != canonical && name.eq_ignore_ascii_case(canonical))
        .cloned()
        .collect();

    for name in variants {
        if let Some(value) = headers.shift_remove(&name) {
            headers.insert(canonical.to_string(), value);
        }
    }
}

/// Normalizes `Content-Type` and infers it for structured data.
///
/// `data` must be the value before body serialization, otherwise a JSON
/// body would already look like a plain string.
#[must_use]
pub fn normalize_headers(mut headers: Headers, data: &Value) -> Headers {
    normalize_header_name(&mut headers, CONTENT_TYPE);

    let missing = headers.get(CONTENT_TYPE).is_none_or(String::is_empty);
    if data.is_object() && missing {
        headers.insert(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string());
    }

    headers
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn headers<const N: usize>(entries: [(&str, &str); N]) -> Headers {
        entries
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn lowercase_content_type_is_renamed() {
        let result = normalize_headers(
            headers([("content-type", "text/plain")]),
            &Value::from(json!({})),
        );
        assert_eq!(result, headers([("Content-Type", "text/plain")]));
    }

    #[test]
    fn json_content_type_is_inferred() {
        let result = normalize_headers(Headers::new(), &Value::from(json!({"a": 1})));
        assert_eq!(
            result,
            headers([("Content-Type", "application/json;charset=utf-8")])
        );
    }

    #[test]
    fn arrays_and_dates_infer_json() {
        let result = normalize_headers(Headers::new(), &Value::from(vec![1]));
        assert_eq!(result.get(CONTENT_TYPE).map(String::as_str), Some(JSON_CONTENT_TYPE));
    }

    #[test]
    fn scalar_data_infers_nothing() {
        assert!(normalize_headers(Headers::new(), &Value::from("plain")).is_empty());
        assert!(normalize_headers(Headers::new(), &Value::Null).is_empty());
        assert!(normalize_headers(Headers::new(), &Value::from(3)).is_empty());
    }

    #[test]
    fn explicit_content_type_is_kept() {
        let result = normalize_headers(
            headers([("CONTENT-TYPE", "application/vnd.api+json")]),
            &Value::from(json!({"a": 1})),
        );
        assert_eq!(result, headers([("Content-Type", "application/vnd.api+json")]));
    }

    #[test]
    fn empty_content_type_is_replaced() {
        let result = normalize_headers(
            headers([("Content-Type", "")]),
            &Value::from(json!({"a": 1})),
        );
        assert_eq!(result, headers([("Content-Type", JSON_CONTENT_TYPE)]));
    }

    #[test]
    fn last_variant_wins() {
        let mut result = headers([
            ("Content-Type", "text/plain"),
            ("content-type", "text/csv"),
            ("Accept", "*/*"),
        ]);
        normalize_header_name(&mut result, CONTENT_TYPE);
        assert_eq!(
            result,
            headers([("Content-Type", "text/csv"), ("Accept", "*/*")])
        );
    }

    #[test]
    fn other_headers_are_untouched() {
        let result = normalize_headers(
            headers([("x-request-id", "42"), ("accept", "*/*")]),
            &Value::Null,
        );
        assert_eq!(result, headers([("x-request-id", "42"), ("accept", "*/*")]));
    }
}
