//! HTTP method types.

use std::str::FromStr;

use derive_more::Display;

/// HTTP request method.
///
/// Names outside the standard set, such as `PROPFIND`, are kept as
/// [`Method::Extension`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Display)]
pub enum Method {
    /// GET method - retrieve a resource.
    #[default]
    #[display("GET")]
    Get,
    /// POST method - create a resource.
    #[display("POST")]
    Post,
    /// PUT method - replace a resource.
    #[display("PUT")]
    Put,
    /// DELETE method - remove a resource.
    #[display("DELETE")]
    Delete,
    /// PATCH method - partially update a resource.
    #[display("PATCH")]
    Patch,
    /// HEAD method - retrieve headers only.
    #[display("HEAD")]
    Head,
    /// OPTIONS method - retrieve allowed methods.
    #[display("OPTIONS")]
    Options,
    /// Any other valid method token, upper-cased.
    #[display("{_0}")]
    Extension(http::Method),
}

impl Method {
    /// Returns `true` if the method is safe (does not modify resources).
    #[must_use]
    pub const fn is_safe(&self) -> bool {
        matches!(self, Self::Get | Self::Head | Self::Options)
    }

    /// Returns `true` if the method is idempotent.
    #[must_use]
    pub const fn is_idempotent(&self) -> bool {
        matches!(
            self,
            Self::Get | Self::Head | Self::Options | Self::Put | Self::Delete
        )
    }
}

impl FromStr for Method {
    type Err = crate::Error;

    /// Parses a method name, ignoring case.
    ///
    /// Any valid token is accepted; it is upper-cased first.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let upper = name.to_ascii_uppercase();
        match upper.as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "PATCH" => Ok(Self::Patch),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            _ => http::Method::from_bytes(upper.as_bytes())
                .map(Self::Extension)
                .map_err(|_| {
                    crate::Error::InvalidRequest(format!("invalid HTTP method: {name:?}"))
                }),
        }
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
            Method::Patch => Self::PATCH,
            Method::Head => Self::HEAD,
            Method::Options => Self::OPTIONS,
            Method::Extension(method) => method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!(Method::Options.to_string(), "OPTIONS");
    }

    #[test]
    fn method_defaults_to_get() {
        assert_eq!(Method::default(), Method::Get);
    }

    #[test]
    fn method_parse_ignores_case() {
        assert_eq!("post".parse::<Method>().expect("post"), Method::Post);
        assert_eq!("Delete".parse::<Method>().expect("delete"), Method::Delete);
        assert_eq!("PATCH".parse::<Method>().expect("patch"), Method::Patch);
    }

    #[test]
    fn method_parse_extension() {
        let method = "propfind".parse::<Method>().expect("propfind");
        assert_eq!(method.to_string(), "PROPFIND");
        assert!(!method.is_safe());
        assert!(!method.is_idempotent());
        assert_eq!(
            http::Method::from(method),
            http::Method::from_bytes(b"PROPFIND").expect("token")
        );

        let method = "Query".parse::<Method>().expect("query");
        assert_eq!(method, Method::Extension(http::Method::from_bytes(b"QUERY").expect("token")));
    }

    #[test]
    fn method_parse_invalid_token() {
        let err = "bad method".parse::<Method>().expect_err("invalid token");
        assert_eq!(
            err.to_string(),
            r#"invalid request: invalid HTTP method: "bad method""#
        );
        assert!("".parse::<Method>().is_err());
    }

    #[test]
    fn method_is_safe() {
        assert!(Method::Get.is_safe());
        assert!(Method::Head.is_safe());
        assert!(!Method::Post.is_safe());
        assert!(!Method::Patch.is_safe());
    }

    #[test]
    fn method_is_idempotent() {
        assert!(Method::Put.is_idempotent());
        assert!(Method::Delete.is_idempotent());
        assert!(!Method::Post.is_idempotent());
    }

    #[test]
    fn method_into_http() {
        assert_eq!(http::Method::from(Method::Get), http::Method::GET);
        assert_eq!(http::Method::from(Method::Post), http::Method::POST);
    }
}
