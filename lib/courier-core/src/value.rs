//! Dynamic values for query parameters and request bodies.
//!
//! A [`Value`] is what callers put in [`Params`] or in the request data. The
//! pipeline classifies it with [`Value::is_date`] and [`Value::is_object`] to
//! decide how it goes over the wire.
//!
//! # Example
//!
//! ```
//! use courier_core::{Params, Value};
//!
//! let params = Params::new()
//!     .with("q", "rust")
//!     .with("page", 2)
//!     .with("tags", vec!["http", "client"])
//!     .with("cursor", None::<String>);
//!
//! assert_eq!(params.len(), 4);
//! assert!(Value::from(vec![1, 2]).is_object());
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::Result;

/// A dynamically typed parameter or body value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value, skipped in query strings and sent as an empty body.
    #[default]
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Finite numeric scalar, digits as JavaScript prints them.
    Number(serde_json::Number),
    /// `NaN` or an infinity: `NaN`/`Infinity` in text, `null` in JSON.
    NonFinite(f64),
    /// String scalar.
    String(String),
    /// Date/time instant.
    Date(DateTime<Utc>),
    /// Ordered sequence.
    Array(Vec<Value>),
    /// Structured object, keys kept in insertion order.
    Object(IndexMap<String, Value>),
}

impl Value {
    /// Returns `true` for a date/time instant.
    ///
    /// Date-like strings or timestamps are not dates.
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Returns `true` for any non-null structured value.
    ///
    /// Arrays and dates are structured too.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Array(_) | Self::Date(_))
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// String content, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Canonical JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Into::into)
    }

    /// Plain text form of the value.
    ///
    /// Scalars render as themselves, dates as ISO-8601 instants and
    /// structured values as canonical JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if a structured value cannot be serialized.
    pub fn to_text(&self) -> Result<String> {
        match self {
            Self::Null => Ok("null".to_string()),
            Self::Bool(b) => Ok(b.to_string()),
            Self::Number(n) => Ok(n.to_string()),
            Self::NonFinite(n) => Ok(ryu_js::Buffer::new().format(*n).to_string()),
            Self::String(s) => Ok(s.clone()),
            Self::Date(date) => Ok(iso_instant(date)),
            Self::Array(_) | Self::Object(_) => self.to_json(),
        }
    }
}

/// Formats a date as an ISO-8601 instant with millisecond precision.
///
/// ```
/// use chrono::{TimeZone, Utc};
///
/// let date = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
/// assert_eq!(courier_core::iso_instant(&date), "2024-01-02T03:04:05.000Z");
/// ```
#[must_use]
pub fn iso_instant(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Null | Self::NonFinite(_) => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Date(date) => serializer.serialize_str(&iso_instant(date)),
            Self::Array(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            Self::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Number(value.into())
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Value {
    /// Digits follow ECMAScript `Number::toString`: `2.0` is `2`, `1e16` is
    /// `10000000000000000`, `1e-7` is `1e-7`.
    fn from(value: f64) -> Self {
        if !value.is_finite() {
            return Self::NonFinite(value);
        }
        ryu_js::Buffer::new()
            .format_finite(value)
            .parse()
            .map_or(Self::Null, Self::Number)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::from(f64::from(value))
    }
}

impl From<serde_json::Number> for Value {
    fn from(number: serde_json::Number) -> Self {
        if number.is_i64() || number.is_u64() {
            return Self::Number(number);
        }
        number.as_f64().map_or(Self::Null, Self::from)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.into(),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(values) => {
                Self::Array(values.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(entries) => Self::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect(),
            ),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Object(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

// ============================================================================
// Params
// ============================================================================

/// Query parameters, iterated in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Params(IndexMap<String, Value>);

impl Params {
    /// Creates an empty parameter mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a parameter.
    ///
    /// Re-inserting an existing name replaces its value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Value for a parameter name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Number of parameters, null ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
