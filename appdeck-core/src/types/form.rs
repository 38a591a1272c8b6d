//! Form field values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single form-field value: free-form text or a number.
///
/// No validation happens at this layer; required-ness is a
/// presentational hint only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text input value.
    Text(String),
    /// Numeric input value (ratings, counters).
    Number(f64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_is_untagged() {
        assert_eq!(
            serde_json::to_string(&FieldValue::from("Ada")).unwrap(),
            r#""Ada""#
        );
        assert_eq!(serde_json::to_string(&FieldValue::from(4u32)).unwrap(), "4");
        let parsed: FieldValue = serde_json::from_str("3.5").unwrap();
        assert_eq!(parsed, FieldValue::Number(3.5));
    }
}
