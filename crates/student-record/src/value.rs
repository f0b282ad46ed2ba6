//! Scalar Field Values

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A single scalar value held by a record field
///
/// Deserializes directly from a JSON scalar: `null`, booleans, integers,
/// floats and strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Explicit missing value
    Null,
    /// Boolean flag
    Bool(bool),
    /// Whole number
    Integer(i64),
    /// Real number
    Float(f64),
    /// Free text or a categorical label
    Text(String),
}

impl FieldValue {
    /// Coerce the value into the string used for categorical lookup.
    ///
    /// The conversion is total:
    /// - text is used as-is
    /// - integers and floats use their decimal `Display` form (`2.0` becomes `"2"`)
    /// - booleans become `"yes"` / `"no"`
    /// - null becomes the empty string, which is never a domain member
    pub fn to_category(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s.as_str()),
            FieldValue::Integer(i) => Cow::Owned(i.to_string()),
            FieldValue::Float(f) => Cow::Owned(f.to_string()),
            FieldValue::Bool(true) => Cow::Borrowed("yes"),
            FieldValue::Bool(false) => Cow::Borrowed("no"),
            FieldValue::Null => Cow::Borrowed(""),
        }
    }

    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Whether the value is an explicit null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Short type name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            other => f.write_str(&other.to_category()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_coercion() {
        assert_eq!(FieldValue::from("GP").to_category(), "GP");
        assert_eq!(FieldValue::from(7).to_category(), "7");
        assert_eq!(FieldValue::from(2.5).to_category(), "2.5");
        assert_eq!(FieldValue::from(2.0).to_category(), "2");
        assert_eq!(FieldValue::from(true).to_category(), "yes");
        assert_eq!(FieldValue::from(false).to_category(), "no");
        assert_eq!(FieldValue::Null.to_category(), "");
    }

    #[test]
    fn test_numeric_view() {
        assert_eq!(FieldValue::from(14).as_f64(), Some(14.0));
        assert_eq!(FieldValue::from(3.5).as_f64(), Some(3.5));
        assert_eq!(FieldValue::from("14").as_f64(), None);
        assert_eq!(FieldValue::Null.as_f64(), None);
    }

    #[test]
    fn test_deserialize_json_scalars() {
        let values: Vec<FieldValue> =
            serde_json::from_str(r#"[null, true, 10, 10.5, "MS"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Null,
                FieldValue::Bool(true),
                FieldValue::Integer(10),
                FieldValue::Float(10.5),
                FieldValue::Text("MS".to_string()),
            ]
        );
    }
}
