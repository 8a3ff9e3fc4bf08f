//! The closed field value variant.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

/// A record's value for one field.
///
/// `Empty` covers absent keys and explicit nulls. Scalars keep their JSON
/// type so a value read from one record can be written to another unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum FieldValue {
    #[default]
    Empty,
    Scalar(Value),
    List(Vec<Value>),
}

impl FieldValue {
    /// Convert arbitrary JSON (e.g. parsed frontmatter) into a field value.
    ///
    /// Objects are not valid property values and collapse to `Empty`.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::Array(items) => Self::List(items),
            Value::Object(_) => {
                trace!("object-valued property treated as empty");
                Self::Empty
            }
            scalar => Self::Scalar(scalar),
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self::Scalar(Value::String(s.into()))
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(|s| Value::String(s.into())).collect())
    }

    /// False for empty, null, `false`, zero, zero-length strings and
    /// zero-length lists.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Scalar(Value::Null) => false,
            Self::Scalar(Value::Bool(b)) => *b,
            Self::Scalar(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Self::Scalar(Value::String(s)) => !s.is_empty(),
            Self::Scalar(Value::Array(items)) => !items.is_empty(),
            Self::Scalar(Value::Object(_)) => false,
            Self::List(items) => !items.is_empty(),
        }
    }

    /// The canonical string form used as a grouping key.
    pub fn to_canonical_string(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Scalar(value) => scalar_to_string(value),
            Self::List(items) => items
                .iter()
                .map(scalar_to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// The typed data behind the value, `None` when there is none.
    pub fn raw(&self) -> Option<Value> {
        match self {
            Self::Empty => None,
            Self::Scalar(Value::Null) => None,
            Self::Scalar(value) => Some(value.clone()),
            Self::List(items) => Some(Value::Array(items.clone())),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::text(s)
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            // Whole floats print without a fraction, the way the host shows them.
            Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Value::Array(items) => items
            .iter()
            .map(scalar_to_string)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(null))]
    #[case(json!(""))]
    #[case(json!([]))]
    #[case(json!({"nested": true}))]
    #[case(json!(false))]
    #[case(json!(0))]
    #[case(json!(0.0))]
    fn test_falsy_variants(#[case] raw: Value) {
        assert!(!FieldValue::from_json(raw).is_truthy());
    }

    #[rstest]
    #[case(json!("Done"), "Done")]
    #[case(json!(3), "3")]
    #[case(json!(2.0), "2")]
    #[case(json!(2.5), "2.5")]
    #[case(json!(true), "true")]
    #[case(json!(-1), "-1")]
    #[case(json!(["a", "b"]), "a, b")]
    fn test_canonical_string(#[case] raw: Value, #[case] expected: &str) {
        let value = FieldValue::from_json(raw);
        assert!(value.is_truthy());
        assert_eq!(value.to_canonical_string(), expected);
    }

    #[test]
    fn test_raw_preserves_type() {
        assert_eq!(FieldValue::from_json(json!(5)).raw(), Some(json!(5)));
        assert_eq!(
            FieldValue::list(["x", "y"]).raw(),
            Some(json!(["x", "y"]))
        );
        assert_eq!(FieldValue::Empty.raw(), None);
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(FieldValue::default(), FieldValue::Empty);
        assert!(!FieldValue::default().is_truthy());
    }
}
