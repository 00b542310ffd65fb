use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::gts::Gts;

/// A host value that can be rendered as a WarpScript literal.
///
/// Most values convert through `From`, so `Warpscript::script` can take
/// plain Rust values. Strings go through the sanitizer's heuristics
/// (`ws:` fragments, durations, dates), the other variants render
/// unambiguously.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    Bool(bool),
    Long(i64),
    Double(f64),
    String(String),
    /// A pre-built WarpScript fragment, inlined verbatim.
    Raw(String),
    /// Rendered as microseconds since the Unix epoch.
    Timestamp(DateTime<Utc>),
    /// Rendered as microseconds.
    Duration(Duration),
    List(Vec<ScriptValue>),
    /// Keys keep their insertion order, like the script they produce.
    Map(Vec<(String, ScriptValue)>),
    Gts(Gts),
}

impl ScriptValue {
    /// Creates a raw WarpScript fragment that bypasses quoting.
    pub fn raw(fragment: impl Into<String>) -> Self {
        Self::Raw(fragment.into())
    }

    /// Creates an empty map, useful for `{}` parameters.
    pub fn empty_map() -> Self {
        Self::Map(Vec::new())
    }

    /// Builds a map value from `(key, value)` pairs, keeping their order.
    pub fn map<K: Into<String>, V: Into<ScriptValue>>(entries: Vec<(K, V)>) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<bool> for ScriptValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for ScriptValue {
    fn from(value: i32) -> Self {
        Self::Long(value as i64)
    }
}

impl From<i64> for ScriptValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<u32> for ScriptValue {
    fn from(value: u32) -> Self {
        Self::Long(value as i64)
    }
}

impl From<f64> for ScriptValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for ScriptValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ScriptValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<DateTime<Utc>> for ScriptValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<NaiveDateTime> for ScriptValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::Timestamp(value.and_utc())
    }
}

impl From<NaiveDate> for ScriptValue {
    fn from(value: NaiveDate) -> Self {
        Self::Timestamp(value.and_time(NaiveTime::MIN).and_utc())
    }
}

impl From<Duration> for ScriptValue {
    fn from(value: Duration) -> Self {
        Self::Duration(value)
    }
}

impl From<Gts> for ScriptValue {
    fn from(value: Gts) -> Self {
        Self::Gts(value)
    }
}

impl<T: Into<ScriptValue>> From<Vec<T>> for ScriptValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for ScriptValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            // WarpScript has a NULL word
            serde_json::Value::Null => Self::Raw("NULL".to_string()),
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(long) = n.as_i64() {
                    Self::Long(long)
                } else {
                    Self::Double(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(values) => {
                Self::List(values.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_scalars() {
        assert_eq!(ScriptValue::from(42i64), ScriptValue::Long(42));
        assert_eq!(ScriptValue::from(1.5), ScriptValue::Double(1.5));
        assert_eq!(ScriptValue::from(true), ScriptValue::Bool(true));
        assert_eq!(
            ScriptValue::from("foo"),
            ScriptValue::String("foo".to_string())
        );
    }

    #[test]
    fn test_from_json() {
        let json: serde_json::Value = serde_json::json!({"a": [1, 2.5], "b": null});
        let value = ScriptValue::from(json);
        assert_eq!(
            value,
            ScriptValue::Map(vec![
                (
                    "a".to_string(),
                    ScriptValue::List(vec![ScriptValue::Long(1), ScriptValue::Double(2.5)])
                ),
                ("b".to_string(), ScriptValue::Raw("NULL".to_string())),
            ])
        );
    }
}
