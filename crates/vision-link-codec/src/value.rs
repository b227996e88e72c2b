//! The closed [`Value`] model every codec stage works on.

use indexmap::IndexMap;
use vision_link_pack::PackValue;

/// Text-keyed map that keeps insertion order.
pub type Mapping = IndexMap<String, Value>;

/// Decoded, format-independent value.
///
/// Numbers are a single `f64` domain, as the producers treat them; any
/// integer the wire carries beyond 2^53 loses precision.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Bytes(Vec<u8>),
    Seq(Vec<Value>),
    Map(Mapping),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Map lookup; `None` for missing keys and for non-map values.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Builds a map from `(key, value)` pairs, later duplicates overwriting
    /// earlier ones in place.
    pub fn map<K, I>(entries: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Renders the value as compact JSON text.
    pub fn to_json_string(&self) -> String {
        serde_json::Value::from(self.clone()).to_string()
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<PackValue> for Value {
    fn from(v: PackValue) -> Self {
        match v {
            PackValue::Null | PackValue::Undefined => Value::Null,
            PackValue::Bool(b) => Value::Bool(b),
            PackValue::Integer(i) => Value::Number(i as f64),
            PackValue::UInteger(u) => Value::Number(u as f64),
            PackValue::Float(f) => Value::Number(f),
            PackValue::Bytes(b) => Value::Bytes(b),
            // Typed binary views arrive as extensions; only the payload matters.
            PackValue::Extension(ext) => Value::Bytes(ext.data),
            PackValue::Str(s) => Value::Text(s),
            PackValue::Array(arr) => Value::Seq(arr.into_iter().map(Value::from).collect()),
            PackValue::Object(obj) => {
                Value::Map(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Largest magnitude at which every integer is exactly representable.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl From<Value> for PackValue {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => PackValue::Null,
            Value::Bool(b) => PackValue::Bool(b),
            Value::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                PackValue::Integer(n as i64)
            }
            Value::Number(n) => PackValue::Float(n),
            Value::Text(s) => PackValue::Str(s),
            Value::Bytes(b) => PackValue::Bytes(b),
            Value::Seq(items) => PackValue::Array(items.into_iter().map(PackValue::from).collect()),
            Value::Map(map) => {
                PackValue::Object(map.into_iter().map(|(k, v)| (k, PackValue::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        PackValue::from(v).into()
    }
}
