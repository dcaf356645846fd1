//! The in-memory value representation exchanged with callers.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::ext::ExtensionValue;
use crate::timestamp::Timestamp;

/// Universal value type spanning everything the wire format can carry.
///
/// A decoded `Value`, re-encoded, produces a byte stream that decodes back
/// to a structurally equal `Value`. Maps are ordered pair sequences: key
/// order and duplicate keys survive a decode untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    /// Integer in the union of the i64 and u64 domains. Values outside
    /// `[-2^63, 2^64 - 1]` are rejected at encode time.
    Integer(i128),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Extension(ExtensionValue),
    /// The builtin type -1 extension, decoded through the registry.
    Timestamp(Timestamp),
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i as i128)
                } else if let Some(u) = n.as_u64() {
                    Value::Integer(u as i128)
                } else {
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Value::Map(
                obj.into_iter()
                    .map(|(k, v)| (Value::Str(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Lossy conversion toward JSON: binary and extension payloads render as
/// base64 data URIs, timestamps as RFC 3339 strings, non-string map keys as
/// their JSON rendering. Duplicate map keys collapse last-write-wins.
impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Nil => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Integer(i) => {
                if let Ok(small) = i64::try_from(i) {
                    serde_json::json!(small)
                } else {
                    serde_json::json!(i as u64)
                }
            }
            Value::Float(f) => serde_json::json!(f),
            Value::Str(s) => serde_json::Value::String(s),
            Value::Bytes(b) => serde_json::Value::String(format!(
                "data:application/octet-stream;base64,{}",
                BASE64.encode(&b)
            )),
            Value::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Map(pairs) => {
                let mut obj = serde_json::Map::new();
                for (key, val) in pairs {
                    let key = match key {
                        Value::Str(s) => s,
                        other => serde_json::Value::from(other).to_string(),
                    };
                    obj.insert(key, serde_json::Value::from(val));
                }
                serde_json::Value::Object(obj)
            }
            Value::Extension(ext) => serde_json::Value::String(format!(
                "data:application/octet-stream;base64,{}",
                BASE64.encode(ext.data())
            )),
            Value::Timestamp(ts) => match ts.datetime() {
                Some(dt) => serde_json::Value::String(dt.to_rfc3339()),
                None => serde_json::Value::Null,
            },
        }
    }
}
