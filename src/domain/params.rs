use std::collections::BTreeMap;
use std::fmt;

/// A scalar query parameter value.
///
/// The gateway only understands flat query strings, so composite values
/// (such as the user-defined field map) must be serialized by the caller
/// into a `Str` before they reach the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
}

/// Query parameters keyed by gateway field name.
///
/// Keys are kept sorted so the encoded query string is deterministic.
pub type QueryParams = BTreeMap<String, ParamValue>;

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}
