//! Query string serialization.
//!
//! [`build_url`] appends [`Params`] to a URL. Parameters are emitted in
//! insertion order, nulls are skipped, arrays repeat their key with a `[]`
//! suffix, dates become ISO-8601 instants and structured values become JSON.
//!
//! Keys and values use URI component encoding, except that `@ : $ , [ ]`
//! stay literal and a space becomes `+`.
//!
//! # Example
//!
//! ```
//! use courier_core::{Params, build_url};
//!
//! let params = Params::new().with("q", "a b").with("ids", vec![1, 2]);
//! let url = build_url("https://api.test/search#top", Some(&params)).expect("url");
//!
//! assert_eq!(url, "https://api.test/search?q=a+b&ids%5B%5D=1&ids%5B%5D=2");
//! ```

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::{Params, Result, Value};

/// Characters escaped in keys and values.
///
/// Starts from the `encodeURIComponent` set, then keeps the characters that
/// servers read fine as literals. Spaces are left for the `+` substitution.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'@')
    .remove(b':')
    .remove(b'$')
    .remove(b',')
    .remove(b'[')
    .remove(b']')
    .remove(b' ');

/// Key suffix marking a sequence parameter, already encoded.
const SEQUENCE_SUFFIX: &str = "%5B%5D";

/// Percent-encodes a query key or value.
///
/// ```
/// assert_eq!(courier_core::encode_component("a b@c/d"), "a+b@c%2Fd");
/// ```
#[must_use]
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, QUERY_COMPONENT)
        .to_string()
        .replace(' ', "+")
}

/// Serializes `params` into a `key=value&...` string.
///
/// Returns an empty string when every value is null.
///
/// # Errors
///
/// Returns an error if a structured value cannot be serialized to JSON.
pub fn serialize_params(params: &Params) -> Result<String> {
    let mut parts = Vec::with_capacity(params.len());

    for (name, value) in params {
        let (key, values) = match value {
            Value::Null => continue,
            Value::Array(values) => (
                format!("{}{SEQUENCE_SUFFIX}", encode_component(name)),
                values.as_slice(),
            ),
            single => (encode_component(name), std::slice::from_ref(single)),
        };

        for value in values {
            let text = value.to_text()?;
            parts.push(format!("{key}={}", encode_component(&text)));
        }
    }

    Ok(parts.join("&"))
}

/// Appends serialized `params` to `url`.
///
/// The URL is returned untouched when `params` is absent or yields no
/// emissions. Otherwise any fragment is dropped and the parameters are
/// joined with `?`, or `&` if the URL already has a query.
///
/// # Errors
///
/// Returns an error if a structured value cannot be serialized to JSON.
pub fn build_url(url: &str, params: Option<&Params>) -> Result<String> {
    let Some(params) = params.filter(|params| !params.is_empty()) else {
        return Ok(url.to_string());
    };

    let serialized = serialize_params(params)?;
    if serialized.is_empty() {
        return Ok(url.to_string());
    }

    let base = url.split_once('#').map_or(url, |(base, _fragment)| base);
    let separator = if base.contains('?') { '&' } else { '?' };

    Ok(format!("{base}{separator}{serialized}"))
}

#[cfg(test)]
mod tests {
    use assert2::check;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn absent_params_keep_url() {
        check!(build_url("http://a.com", None).expect("url") == "http://a.com");
        check!(build_url("http://a.com", Some(&Params::new())).expect("url") == "http://a.com");
    }

    #[test]
    fn null_params_are_skipped() {
        let params = Params::new().with("a", Value::Null).with("b", None::<u32>);
        check!(build_url("http://a.com", Some(&params)).expect("url") == "http://a.com");
    }

    #[test]
    fn null_params_keep_fragment() {
        let params = Params::new().with("a", Value::Null);
        check!(build_url("http://a.com/#frag", Some(&params)).expect("url") == "http://a.com/#frag");
    }

    #[test]
    fn null_between_values() {
        let params = Params::new()
            .with("a", 1)
            .with("b", Value::Null)
            .with("c", 3);
        check!(build_url("/base", Some(&params)).expect("url") == "/base?a=1&c=3");
    }

    #[test]
    fn scalar_params() {
        let params = Params::new().with("a", 1).with("b", 2);
        check!(build_url("/base/get", Some(&params)).expect("url") == "/base/get?a=1&b=2");
    }

    #[test]
    fn array_params_repeat_key() {
        let params = Params::new().with("ids", vec![1, 2]);
        check!(
            build_url("http://a.com", Some(&params)).expect("url")
                == "http://a.com?ids%5B%5D=1&ids%5B%5D=2"
        );
    }

    #[test]
    fn empty_array_emits_nothing() {
        let params = Params::new().with("ids", Vec::<u32>::new());
        check!(build_url("http://a.com", Some(&params)).expect("url") == "http://a.com");
    }

    #[test]
    fn object_param_is_json() {
        let params = Params::new().with("foo", json!({"bar": "baz"}));
        insta::assert_snapshot!(
            build_url("/base/get", Some(&params)).expect("url"),
            @"/base/get?foo=%7B%22bar%22:%22baz%22%7D"
        );
    }

    #[test]
    fn nested_array_element_is_json() {
        let params = Params::new().with("m", json!([[1, 2], {"k": null}]));
        insta::assert_snapshot!(
            build_url("/m", Some(&params)).expect("url"),
            @"/m?m%5B%5D=[1,2]&m%5B%5D=%7B%22k%22:null%7D"
        );
    }

    #[test]
    fn date_param_is_iso_instant() {
        let date = Utc
            .with_ymd_and_hms(2019, 4, 1, 12, 30, 0)
            .single()
            .expect("valid date");
        let params = Params::new().with("date", date);
        check!(
            build_url("/base/get", Some(&params)).expect("url")
                == "/base/get?date=2019-04-01T12:30:00.000Z"
        );
    }

    #[test]
    fn special_characters_stay_literal() {
        let params = Params::new().with("foo", "@:$, []");
        check!(build_url("/base/get", Some(&params)).expect("url") == "/base/get?foo=@:$,+[]");
    }

    #[test]
    fn space_is_plus() {
        check!(encode_component("a b") == "a+b");
        check!(!encode_component("a b").contains("%20"));
    }

    #[test]
    fn reserved_characters_are_escaped() {
        check!(encode_component("a&b=c/d?e#f%") == "a%26b%3Dc%2Fd%3Fe%23f%25");
        check!(encode_component("-_.!~*'()") == "-_.!~*'()");
        check!(encode_component("é") == "%C3%A9");
    }

    #[test]
    fn fragment_is_dropped() {
        let params = Params::new().with("a", 1);
        check!(build_url("http://a.com#frag", Some(&params)).expect("url") == "http://a.com?a=1");
    }

    #[test]
    fn existing_query_is_kept() {
        let params = Params::new().with("a", 1);
        check!(build_url("http://a.com?x=1", Some(&params)).expect("url") == "http://a.com?x=1&a=1");
    }

    #[test]
    fn existing_query_and_fragment() {
        let params = Params::new().with("bar", "baz");
        check!(
            build_url("/base/get?foo=bar#hash", Some(&params)).expect("url")
                == "/base/get?foo=bar&bar=baz"
        );
    }

    #[test]
    fn keys_are_encoded() {
        let params = Params::new().with("a key/", "v").with("list[]", vec!["x"]);
        check!(
            build_url("/k", Some(&params)).expect("url") == "/k?a+key%2F=v&list[]%5B%5D=x"
        );
    }

    #[test]
    fn float_params_use_javascript_digits() {
        let params = Params::new()
            .with("a", 9_007_199_254_740_992.0)
            .with("b", 1e16)
            .with("c", 1e20)
            .with("d", 1e21)
            .with("e", 1e-6)
            .with("f", 1e-7);
        insta::assert_snapshot!(
            build_url("/x", Some(&params)).expect("url"),
            @"/x?a=9007199254740992&b=10000000000000000&c=100000000000000000000&d=1e%2B21&e=0.000001&f=1e-7"
        );
    }

    #[test]
    fn non_finite_params_are_emitted() {
        let params = Params::new()
            .with("n", f64::NAN)
            .with("i", f64::INFINITY)
            .with("m", vec![f64::NEG_INFINITY]);
        check!(
            build_url("/x", Some(&params)).expect("url") == "/x?n=NaN&i=Infinity&m%5B%5D=-Infinity"
        );
    }

    proptest! {
        #[test]
        fn scalar_params_keep_insertion_order(
            values in prop::collection::vec(any::<u32>(), 1..16)
        ) {
            let params: Params = values
                .iter()
                .enumerate()
                .map(|(idx, value)| (format!("k{idx}"), *value))
                .collect();

            let expected = values
                .iter()
                .enumerate()
                .map(|(idx, value)| format!("k{idx}={value}"))
                .collect::<Vec<_>>()
                .join("&");

            let url = build_url("/p", Some(&params)).expect("url");
            prop_assert_eq!(url, format!("/p?{expected}"));
        }
    }
}
