use hashbrown::HashMap as FastHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The value a route produces when parsing and consumes when formatting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Unit,
    Text(String),
    Int(i64),
    Float(f64),
    Record(Record),
}

/// Captured values keyed by capture name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(FastHashMap<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(key: impl Into<String>, value: Value) -> Self {
        let mut record = Self::new();
        record.insert(key, value);
        record
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    fn extend(&mut self, other: Record) {
        self.0.extend(other.0);
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    /// Combines the values of two routes parsed in sequence.
    ///
    /// Records are unioned, keys of `right` winning. A unit side yields the
    /// other side, and a record is kept over a bare value.
    pub fn merge(self, right: Value) -> Value {
        match (self, right) {
            (Value::Unit, right) => right,
            (left, Value::Unit) => left,
            (Value::Record(mut left), Value::Record(right)) => {
                left.extend(right);
                Value::Record(left)
            }
            (record @ Value::Record(_), _) | (_, record @ Value::Record(_)) => record,
            (_, right) => right,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Integers widen to floats.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Looks `key` up when this value is a record.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_record().and_then(|record| record.get(key))
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Value::Unit)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Text(_) => "text",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Record(_) => "record",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => f.write_str("()"),
            Value::Text(text) => f.write_str(text),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Record(record) => {
                let mut entries: Vec<_> = record.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                f.write_str("{")?;
                for (index, (key, value)) in entries.into_iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_unions_records() {
        let left = Value::Record(Record::single("a", Value::Int(1)));
        let right = Value::Record(Record::single("b", Value::text("x")));
        let merged = left.merge(right);
        assert_eq!(merged.get("a"), Some(&Value::Int(1)));
        assert_eq!(merged.get("b"), Some(&Value::text("x")));
    }

    #[test]
    fn merge_drops_unit_and_bare_values_next_to_records() {
        let record = Value::Record(Record::single("k", Value::Int(3)));
        assert_eq!(Value::Unit.merge(record.clone()), record);
        assert_eq!(record.clone().merge(Value::Unit), record);
        assert_eq!(Value::text("t").merge(record.clone()), record);
        assert_eq!(Value::Int(1).merge(Value::Int(2)), Value::Int(2));
    }

    #[test]
    fn display_sorts_record_keys() {
        let value: Value = Record::new().with("b", 2i64).with("a", "x").into();
        assert_eq!(value.to_string(), "{a: x, b: 2}");
    }
}
