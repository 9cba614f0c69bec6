//! Event payload values and the deep-equality rule used to compare them.

use std::collections::BTreeMap;
use std::fmt;

/// A custom-event `detail` payload.
///
/// The derived `PartialEq` is ordinary equality (`NaN != NaN`). Matchers
/// compare payloads with [`deep_equal`] instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Detail {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Detail>),
    Object(BTreeMap<String, Detail>),
    /// Milliseconds since the Unix epoch; NaN for an invalid date
    Date(f64),
    RegExp { source: String, flags: String },
}

impl Detail {
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Detail>,
        I: IntoIterator<Item = (K, V)>,
    {
        Detail::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn date(epoch_millis: f64) -> Self {
        Detail::Date(epoch_millis)
    }

    pub fn regexp(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Detail::RegExp {
            source: source.into(),
            flags: flags.into(),
        }
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Detail::Null | Detail::Undefined)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Detail::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Detail::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string a JavaScript `String(value)` call would produce.
    pub fn to_js_string(&self) -> String {
        match self {
            Detail::Undefined => "undefined".to_string(),
            Detail::Null => "null".to_string(),
            Detail::Bool(b) => b.to_string(),
            Detail::Number(n) => js_number(*n),
            Detail::String(s) => s.clone(),
            Detail::Array(items) => items
                .iter()
                .map(|item| match item {
                    Detail::Null | Detail::Undefined => String::new(),
                    other => other.to_js_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
            Detail::Object(_) => "[object Object]".to_string(),
            Detail::Date(ms) if ms.is_nan() => "Invalid Date".to_string(),
            Detail::Date(ms) => js_number(*ms),
            Detail::RegExp { source, flags } => format!("/{}/{}", source, flags),
        }
    }
}

fn js_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        // exponent form, with an explicit sign on positive exponents
        let formatted = format!("{:e}", n);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        }
    } else if n == n.trunc() {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detail::String(s) => write!(f, "{:?}", s),
            Detail::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Detail::Object(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Detail::Date(ms) => write!(f, "Date({})", js_number(*ms)),
            other => write!(f, "{}", other.to_js_string()),
        }
    }
}

/// Structural equality of two payloads.
///
/// Sequences compare index by index, mappings by their key sets and values,
/// dates by instant and regular expressions by their `/source/flags` form.
/// Unlike ordinary equality, two NaN numbers are equal.
pub fn deep_equal(a: &Detail, b: &Detail) -> bool {
    if std::ptr::eq(a, b) {
        return true;
    }

    match (a, b) {
        (Detail::Array(a), Detail::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| deep_equal(a, b))
        }
        (Detail::Date(a), Detail::Date(b)) => a == b,
        (
            Detail::RegExp {
                source: a_source,
                flags: a_flags,
            },
            Detail::RegExp {
                source: b_source,
                flags: b_flags,
            },
        ) => a_source == b_source && a_flags == b_flags,
        (Detail::Object(a), Detail::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, value)| b.get(key).is_some_and(|other| deep_equal(value, other)))
        }
        (Detail::Number(a), Detail::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
        (Detail::String(a), Detail::String(b)) => a == b,
        (Detail::Bool(a), Detail::Bool(b)) => a == b,
        (Detail::Null, Detail::Null) | (Detail::Undefined, Detail::Undefined) => true,
        _ => false,
    }
}

impl From<bool> for Detail {
    fn from(value: bool) -> Self {
        Detail::Bool(value)
    }
}

impl From<f64> for Detail {
    fn from(value: f64) -> Self {
        Detail::Number(value)
    }
}

impl From<i32> for Detail {
    fn from(value: i32) -> Self {
        Detail::Number(value as f64)
    }
}

impl From<i64> for Detail {
    fn from(value: i64) -> Self {
        Detail::Number(value as f64)
    }
}

impl From<u32> for Detail {
    fn from(value: u32) -> Self {
        Detail::Number(value as f64)
    }
}

impl From<usize> for Detail {
    fn from(value: usize) -> Self {
        Detail::Number(value as f64)
    }
}

impl From<&str> for Detail {
    fn from(value: &str) -> Self {
        Detail::String(value.to_string())
    }
}

impl From<String> for Detail {
    fn from(value: String) -> Self {
        Detail::String(value)
    }
}

impl<T: Into<Detail>> From<Vec<T>> for Detail {
    fn from(values: Vec<T>) -> Self {
        Detail::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Detail>> From<Option<T>> for Detail {
    fn from(value: Option<T>) -> Self {
        value.map_or(Detail::Null, Into::into)
    }
}

impl From<serde_json::Value> for Detail {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Detail::Null,
            Value::Bool(b) => Detail::Bool(b),
            Value::Number(n) => Detail::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Detail::String(s),
            Value::Array(items) => Detail::Array(items.into_iter().map(Detail::from).collect()),
            Value::Object(map) => {
                Detail::Object(map.into_iter().map(|(k, v)| (k, Detail::from(v))).collect())
            }
        }
    }
}
