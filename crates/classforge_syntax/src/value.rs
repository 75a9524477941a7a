//! Literal value model.
//!
//! [`Value`] mirrors the scalar and array values the emitted language can write as a constant expression. Arrays
//! are ordered maps keyed by [`Key`]; they keep insertion order and follow the language's key rules:
//! - decimal-integer strings such as `"7"` are stored as integer keys
//! - an entry without a key takes the next integer index (one past the largest integer key so far)
//! - a repeated key replaces the earlier value in place

use std::fmt;

/// Array key: integer or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Int(i64),
    String(String),
}

impl Key {
    /// Normalize a string key, turning canonical decimal integers into integer keys.
    pub fn normalized(text: &str) -> Key {
        if is_canonical_int(text) {
            if let Ok(n) = text.parse::<i64>() {
                return Key::Int(n);
            }
        }
        Key::String(text.to_string())
    }

    /// Coerce a scalar value into a key; arrays cannot be keys.
    pub fn from_value(value: &Value) -> Option<Key> {
        match value {
            Value::Null => Some(Key::String(String::new())),
            Value::Bool(b) => Some(Key::Int(i64::from(*b))),
            Value::Int(n) => Some(Key::Int(*n)),
            // Truncation toward zero, saturating at the i64 range.
            Value::Float(f) => Some(Key::Int(*f as i64)),
            Value::String(s) => Some(Key::normalized(s)),
            Value::Array(_) => None,
        }
    }
}

fn is_canonical_int(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return false;
    }
    // `-0` stays a string key.
    !(text.starts_with('-') && digits == "0")
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::normalized(s)
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::normalized(&s)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{n}"),
            Key::String(s) => f.write_str(s),
        }
    }
}

/// A constant value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<(Key, Value)>),
}

impl Value {
    /// Build a list (keys `0..n`).
    pub fn list(items: impl IntoIterator<Item = Value>) -> Value {
        let mut builder = ArrayBuilder::new();
        for item in items {
            builder.push(item);
        }
        builder.finish()
    }

    /// Build an array from key/value pairs, applying the key rules.
    pub fn array<K: Into<Key>>(entries: impl IntoIterator<Item = (K, Value)>) -> Value {
        let mut builder = ArrayBuilder::new();
        for (key, value) in entries {
            builder.insert(key.into(), value);
        }
        builder.finish()
    }

    pub fn empty_array() -> Value {
        Value::Array(Vec::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[(Key, Value)]> {
        match self {
            Value::Array(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up an array entry by key.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        let key = key.into();
        self.as_array()?.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Whether this is an array whose keys are exactly `0..n` in order.
    pub fn is_list(&self) -> bool {
        self.as_array().is_some_and(|entries| {
            entries
                .iter()
                .enumerate()
                .all(|(i, (k, _))| i64::try_from(i).is_ok_and(|i| *k == Key::Int(i)))
        })
    }

    /// Name of the value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Incremental array construction with the language's key rules.
#[derive(Debug, Default)]
pub struct ArrayBuilder {
    entries: Vec<(Key, Value)>,
    next_index: i64,
}

impl ArrayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append under the next integer index.
    pub fn push(&mut self, value: Value) {
        let key = Key::Int(self.next_index);
        self.insert(key, value);
    }

    /// Insert under an explicit key, replacing an existing entry in place.
    pub fn insert(&mut self, key: Key, value: Value) {
        if let Key::Int(n) = key {
            if n >= self.next_index {
                self.next_index = n.saturating_add(1);
            }
        }
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn finish(self) -> Value {
        Value::Array(self.entries)
    }
}

// ============================================================================
// JSON conversions
// ============================================================================

#[cfg(feature = "json")]
mod json {
    use super::{ArrayBuilder, Key, Value};
    use serde_json::Value as Json;

    impl From<&Json> for Value {
        fn from(json: &Json) -> Self {
            match json {
                Json::Null => Value::Null,
                Json::Bool(b) => Value::Bool(*b),
                Json::Number(n) => match n.as_i64() {
                    Some(i) => Value::Int(i),
                    None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
                },
                Json::String(s) => Value::String(s.clone()),
                Json::Array(items) => Value::list(items.iter().map(Value::from)),
                Json::Object(map) => {
                    let mut builder = ArrayBuilder::new();
                    for (k, v) in map {
                        builder.insert(Key::normalized(k), Value::from(v));
                    }
                    builder.finish()
                }
            }
        }
    }

    impl From<Json> for Value {
        fn from(json: Json) -> Self {
            Value::from(&json)
        }
    }

    impl Value {
        /// Convert to JSON: lists become arrays, other arrays become objects, non-finite floats become `null`.
        pub fn to_json(&self) -> Json {
            match self {
                Value::Null => Json::Null,
                Value::Bool(b) => Json::Bool(*b),
                Value::Int(n) => Json::from(*n),
                Value::Float(f) => serde_json::Number::from_f64(*f).map_or(Json::Null, Json::Number),
                Value::String(s) => Json::String(s.clone()),
                Value::Array(entries) if self.is_list() => {
                    Json::Array(entries.iter().map(|(_, v)| v.to_json()).collect())
                }
                Value::Array(entries) => Json::Object(
                    entries
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_json()))
                        .collect(),
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_string_keys_become_integers() {
        assert_eq!(Key::from("7"), Key::Int(7));
        assert_eq!(Key::from("-3"), Key::Int(-3));
        assert_eq!(Key::from("07"), Key::String("07".into()));
        assert_eq!(Key::from("-0"), Key::String("-0".into()));
        assert_eq!(Key::from("1.5"), Key::String("1.5".into()));
        assert_eq!(Key::from("99999999999999999999"), Key::String("99999999999999999999".into()));
    }

    #[test]
    fn scalar_values_coerce_to_keys() {
        assert_eq!(Key::from_value(&Value::Bool(true)), Some(Key::Int(1)));
        assert_eq!(Key::from_value(&Value::Null), Some(Key::String(String::new())));
        assert_eq!(Key::from_value(&Value::Float(2.9)), Some(Key::Int(2)));
        assert_eq!(Key::from_value(&Value::empty_array()), None);
    }

    #[test]
    fn auto_index_follows_largest_integer_key() {
        let mut b = ArrayBuilder::new();
        b.insert(Key::Int(5), Value::from("a"));
        b.push(Value::from("b"));
        b.insert(Key::from("x"), Value::from("c"));
        b.push(Value::from("d"));
        let value = b.finish();
        let keys: Vec<_> = value.as_array().unwrap().iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec![Key::Int(5), Key::Int(6), Key::from("x"), Key::Int(7)]);
    }

    #[test]
    fn repeated_key_replaces_in_place() {
        let value = Value::array([("a", Value::Int(1)), ("b", Value::Int(2)), ("a", Value::Int(3))]);
        assert_eq!(value, Value::Array(vec![(Key::from("a"), Value::Int(3)), (Key::from("b"), Value::Int(2))]));
    }

    #[test]
    fn list_detection() {
        assert!(Value::list([Value::Int(1), Value::Null]).is_list());
        assert!(Value::empty_array().is_list());
        assert!(!Value::array([(Key::Int(1), Value::Null)]).is_list());
        assert!(!Value::Int(1).is_list());
    }

    #[test]
    fn get_normalizes_lookup_key() {
        let value = Value::list([Value::from("zero")]);
        assert_eq!(value.get("0"), Some(&Value::from("zero")));
        assert_eq!(value.get("missing"), None);
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_round_trip_keeps_shape() {
        let json = serde_json::json!({"a": [1, 2.5, null], "b": {"c": true}});
        let value = Value::from(&json);
        assert_eq!(value.get("a").unwrap().get(1i64), Some(&Value::Float(2.5)));
        assert_eq!(value.to_json(), json);
    }
}
