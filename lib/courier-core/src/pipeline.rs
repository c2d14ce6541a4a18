//! Request normalization pipeline.

use tracing::trace;

use crate::{
    CONTENT_TYPE, PreparedRequest, RequestConfig, Result, build_url, normalize_headers,
    serialize_body,
};

/// Normalizes a request descriptor for the wire.
///
/// Steps run in a fixed order: the URL absorbs the parameters, headers are
/// normalized against the original data, then the data is serialized.
///
/// # Errors
///
/// Returns an error if a parameter or the data cannot be serialized to JSON.
///
/// # Example
///
/// ```
/// use courier_core::{Params, RequestConfig, prepare};
/// use serde_json::json;
///
/// let config = RequestConfig::new("http://api.test")
///     .params(Params::new().with("q", "a b").with("tags", vec!["x", "y"]))
///     .data(json!({"n": 1}));
///
/// let request = prepare(config).expect("prepare");
/// assert_eq!(request.url(), "http://api.test?q=a+b&tags%5B%5D=x&tags%5B%5D=y");
/// assert_eq!(request.header("Content-Type"), Some("application/json;charset=utf-8"));
/// assert_eq!(request.data().as_str(), Some(r#"{"n":1}"#));
/// ```
pub fn prepare(config: RequestConfig) -> Result<PreparedRequest> {
    let RequestConfig {
        url,
        method,
        params,
        headers,
        data,
    } = config;

    let url = build_url(&url, params.as_ref())?;
    let had_content_type = headers
        .keys()
        .any(|name| name.eq_ignore_ascii_case(CONTENT_TYPE));
    let headers = normalize_headers(headers, &data);
    let data = serialize_body(data)?;

    trace!(
        %method,
        %url,
        content_type = headers.get(CONTENT_TYPE).map(String::as_str),
        inferred = !had_content_type && headers.contains_key(CONTENT_TYPE),
        "request prepared"
    );

    Ok(PreparedRequest::new(method, url, headers, data))
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;
    use crate::{Error, Headers, Method, Params, Value};

    #[test]
    fn end_to_end_descriptor() {
        let config = RequestConfig::new("http://api.test")
            .params(Params::new().with("q", "a b").with("tags", vec!["x", "y"]))
            .data(json!({"n": 1}));

        let request = prepare(config).expect("prepare");

        check!(request.url() == "http://api.test?q=a+b&tags%5B%5D=x&tags%5B%5D=y");
        let mut expected = Headers::new();
        expected.insert(
            "Content-Type".to_string(),
            "application/json;charset=utf-8".to_string(),
        );
        check!(request.headers() == &expected);
        check!(request.data() == &Value::from(r#"{"n":1}"#));
        check!(request.method() == &Method::Get);
    }

    #[test]
    fn plain_get_is_untouched() {
        let request = prepare(RequestConfig::new("http://api.test/a#b")).expect("prepare");

        check!(request.url() == "http://api.test/a#b");
        check!(request.headers().is_empty());
        check!(request.data().is_null());
    }

    #[test]
    fn header_inference_sees_structured_data() {
        let config = RequestConfig::new("http://api.test")
            .method(Method::Post)
            .data(vec![1, 2, 3]);

        let request = prepare(config).expect("prepare");

        check!(request.header("Content-Type") == Some("application/json;charset=utf-8"));
        check!(request.data().as_str() == Some("[1,2,3]"));
    }

    #[test]
    fn string_data_keeps_caller_content_type() {
        let config = RequestConfig::new("http://api.test")
            .method(Method::Post)
            .header("content-type", "application/x-www-form-urlencoded")
            .data("a=1&b=2");

        let request = prepare(config).expect("prepare");

        check!(request.header("Content-Type") == Some("application/x-www-form-urlencoded"));
        check!(request.header("content-type").is_none());
        check!(request.data().as_str() == Some("a=1&b=2"));
    }

    #[test]
    fn parsed_method_flows_through() {
        let method: Method = "patch".parse().expect("method");
        let request = prepare(RequestConfig::new("http://api.test").method(method))
            .expect("prepare");
        check!(request.method() == &Method::Patch);
    }

    #[test]
    fn invalid_method_is_rejected_before_prepare() {
        let result = "tea pot".parse::<Method>();
        let_assert!(Err(Error::InvalidRequest(message)) = result);
        check!(message.contains("tea pot"));
    }

    #[test]
    fn extension_method_flows_through() {
        let method: Method = "propfind".parse().expect("method");
        let request = prepare(RequestConfig::new("http://api.test/dav").method(method))
            .expect("prepare");
        check!(request.method().to_string() == "PROPFIND");
    }
}
