//! The [`PackValue`] tree produced by the MessagePack decoder.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::PackExtension;

/// Decoded MessagePack value.
///
/// This mirrors the wire closely: integers keep their signedness, `nil` and
/// the reserved `0xc1` marker stay distinct, and extensions keep their type
/// byte. Higher layers collapse it into a smaller value model.
#[derive(Debug, Clone, PartialEq)]
pub enum PackValue {
    /// MessagePack nil
    Null,
    /// The reserved `0xc1` marker
    Undefined,
    /// Boolean value
    Bool(bool),
    /// Integer that fits in i64
    Integer(i64),
    /// Unsigned integer > i64::MAX
    UInteger(u64),
    /// Floating-point number (float32 is widened)
    Float(f64),
    /// Binary data
    Bytes(Vec<u8>),
    /// String
    Str(String),
    /// Array of values
    Array(Vec<PackValue>),
    /// Map with text keys, in wire order
    Object(Vec<(String, PackValue)>),
    /// Extension type
    Extension(Box<PackExtension>),
}

impl PackValue {
    /// Looks up the first entry named `key` in an object.
    pub fn get(&self, key: &str) -> Option<&PackValue> {
        match self {
            PackValue::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for PackValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => PackValue::Null,
            serde_json::Value::Bool(b) => PackValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    PackValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    PackValue::UInteger(u)
                } else {
                    PackValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => PackValue::Str(s),
            serde_json::Value::Array(arr) => {
                PackValue::Array(arr.into_iter().map(PackValue::from).collect())
            }
            serde_json::Value::Object(obj) => PackValue::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, PackValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<PackValue> for serde_json::Value {
    fn from(v: PackValue) -> Self {
        match v {
            PackValue::Null | PackValue::Undefined => serde_json::Value::Null,
            PackValue::Bool(b) => serde_json::Value::Bool(b),
            PackValue::Integer(i) => serde_json::json!(i),
            PackValue::UInteger(u) => serde_json::json!(u),
            // Non-finite floats have no JSON form and become null.
            PackValue::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            PackValue::Bytes(b) => serde_json::Value::String(STANDARD.encode(b)),
            PackValue::Str(s) => serde_json::Value::String(s),
            PackValue::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            PackValue::Object(obj) => serde_json::Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
            PackValue::Extension(ext) => serde_json::Value::String(STANDARD.encode(&ext.data)),
        }
    }
}
