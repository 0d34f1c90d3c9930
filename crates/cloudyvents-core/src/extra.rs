use crate::validation::{too_deep, FieldPath, ValidationError, EXTRA_ROOT_DEPTH, MAX_EXTRA_DEPTH};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// Metadata mapping attached to an event.
///
/// Keys are always text; key order carries no meaning.
pub type Extra = BTreeMap<String, ExtraValue>;

/// One metadata value: text, a number, or a nested mapping.
///
/// Integers and floats are kept apart by [`serde_json::Number`], so `34`
/// comes back as the integer `34` and not `34.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    /// Text leaf.
    Text(String),
    /// Numeric leaf.
    Number(Number),
    /// Nested mapping.
    Mapping(Extra),
}

impl ExtraValue {
    /// Builds a float leaf; `None` for NaN and infinities.
    pub fn float(value: f64) -> Option<Self> {
        Number::from_f64(value).map(ExtraValue::Number)
    }

    /// Returns the text if this is a text leaf.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ExtraValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is a numeric leaf.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            ExtraValue::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the value as `i64` if it is an integer leaf that fits.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    /// Returns the value as `f64` if it is a numeric leaf.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    /// Returns the nested mapping if this is one.
    pub fn as_mapping(&self) -> Option<&Extra> {
        match self {
            ExtraValue::Mapping(m) => Some(m),
            _ => None,
        }
    }
}

impl From<&str> for ExtraValue {
    fn from(value: &str) -> Self {
        ExtraValue::Text(value.to_string())
    }
}

impl From<String> for ExtraValue {
    fn from(value: String) -> Self {
        ExtraValue::Text(value)
    }
}

impl From<Extra> for ExtraValue {
    fn from(value: Extra) -> Self {
        ExtraValue::Mapping(value)
    }
}

macro_rules! integer_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ExtraValue {
                fn from(value: $ty) -> Self {
                    ExtraValue::Number(Number::from(value))
                }
            }
        )*
    };
}

integer_from!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

/// Converts an untyped JSON value into event metadata.
///
/// The top level must be an object. Booleans, nulls and arrays are not
/// supported metadata values and are rejected with the path where they occur,
/// as are objects nested past [`MAX_EXTRA_DEPTH`].
pub fn extra_from_json(value: Value) -> Result<Extra, ValidationError> {
    let root = FieldPath::root();
    match value {
        Value::Object(map) => map
            .into_iter()
            .map(|(key, child)| {
                let child_path = root.push(&key);
                convert(child, &child_path, EXTRA_ROOT_DEPTH + 1).map(|v| (key, v))
            })
            .collect(),
        other => Err(ValidationError::InvalidExtraShape {
            path: root.to_string(),
            reason: format!("expected a mapping, found {}", kind_of(&other)),
        }),
    }
}

/// `depth` is the payload depth `value` would occupy if it is an object.
fn convert(value: Value, path: &FieldPath, depth: usize) -> Result<ExtraValue, ValidationError> {
    match value {
        Value::String(s) => Ok(ExtraValue::Text(s)),
        Value::Number(n) => Ok(ExtraValue::Number(n)),
        Value::Object(_) if depth > MAX_EXTRA_DEPTH => Err(too_deep(path)),
        Value::Object(map) => {
            let mut out = Extra::new();
            for (key, child) in map {
                let converted = convert(child, &path.push(&key), depth + 1)?;
                out.insert(key, converted);
            }
            Ok(ExtraValue::Mapping(out))
        }
        other => Err(ValidationError::InvalidExtraShape {
            path: path.to_string(),
            reason: format!("unsupported value type {}", kind_of(&other)),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_nested_objects() {
        let extra = extra_from_json(json!({
            "hello1": "hello2",
            "hello5": { "hello3": "hello4" },
            "hello3": "hello6"
        }))
        .unwrap();

        assert_eq!(extra["hello1"].as_str(), Some("hello2"));
        assert_eq!(extra["hello3"].as_str(), Some("hello6"));
        let inner = extra["hello5"].as_mapping().unwrap();
        assert_eq!(inner["hello3"].as_str(), Some("hello4"));
    }

    #[test]
    fn rejects_bare_string() {
        let err = extra_from_json(json!("astring")).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidExtraShape { ref path, .. } if path == "root"));
    }

    #[test]
    fn rejects_unsupported_leaf_with_path() {
        let err = extra_from_json(json!({ "outer": { "flag": true } })).unwrap_err();
        match err {
            ValidationError::InvalidExtraShape { path, reason } => {
                assert_eq!(path, "outer.flag");
                assert!(reason.contains("boolean"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn keeps_integers_and_floats_apart() {
        let extra = extra_from_json(json!({ "count": 34, "ratio": 0.5 })).unwrap();
        assert_eq!(extra["count"].as_i64(), Some(34));
        assert!(extra["ratio"].as_i64().is_none());
        assert_eq!(extra["ratio"].as_f64(), Some(0.5));
    }

    fn json_nested_to_depth(depth: usize) -> Value {
        let mut value = json!({ "leaf": 1 });
        for _ in EXTRA_ROOT_DEPTH..depth {
            value = json!({ "n": value });
        }
        value
    }

    #[test]
    fn converts_nesting_at_limit() {
        let value = json_nested_to_depth(MAX_EXTRA_DEPTH);
        assert!(extra_from_json(value).is_ok());
    }

    #[test]
    fn rejects_nesting_past_limit() {
        let value = json_nested_to_depth(MAX_EXTRA_DEPTH + 1);
        let err = extra_from_json(value).unwrap_err();
        assert!(
            matches!(err, ValidationError::InvalidExtraShape { ref reason, .. } if reason == "nesting too deep"),
            "{err:?}"
        );
    }

    #[test]
    fn float_rejects_non_finite() {
        assert!(ExtraValue::float(f64::NAN).is_none());
        assert!(ExtraValue::float(f64::INFINITY).is_none());
        assert!(ExtraValue::float(1.25).is_some());
    }
}
