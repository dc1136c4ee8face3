//! Opaque input values.
//!
//! The run-streaming source hands the digest loosely-structured payloads that
//! are not guaranteed to be JSON: big integers, timestamps, binary blobs,
//! callables and stream handles all show up in practice. `OpaqueValue` is the
//! closed set of shapes the digest tolerates. Everything downstream matches it
//! exhaustively, so adding a variant is a compile error until every consumer
//! decides how to handle it.

use chrono::{DateTime, Utc};

use crate::kind::ValueKind;

/// An arbitrary payload value as delivered by the source.
#[derive(Debug, Clone, PartialEq)]
pub enum OpaqueValue {
    /// Field declared but without a value (distinct from `null`).
    Missing,
    Null,
    Bool(bool),
    Int(i64),
    /// Any float, including NaN and the infinities.
    Float(f64),
    /// Arbitrary-precision integer as its decimal digits.
    BigInt(String),
    /// Unique token with an optional description.
    Identifier(Option<String>),
    Timestamp(DateTime<Utc>),
    Binary(Vec<u8>),
    /// Function-like value, optionally named.
    Callable(Option<String>),
    /// Stream or handle-like value, optionally named.
    Stream(Option<String>),
    String(String),
    Array(Vec<OpaqueValue>),
    /// Keyed record. `type_name` is the nameable type of the record, if any;
    /// entries keep their insertion order.
    Object {
        type_name: Option<String>,
        entries: Vec<(String, OpaqueValue)>,
    },
}

impl OpaqueValue {
    /// Build an untyped object from key/value pairs.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, OpaqueValue)>,
    {
        OpaqueValue::Object {
            type_name: None,
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Build an object carrying a type name.
    pub fn typed_object<K, I>(type_name: impl Into<String>, entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, OpaqueValue)>,
    {
        OpaqueValue::Object {
            type_name: Some(type_name.into()),
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            OpaqueValue::Missing => ValueKind::Missing,
            OpaqueValue::Null => ValueKind::Null,
            OpaqueValue::Bool(_) => ValueKind::Boolean,
            OpaqueValue::Int(_) | OpaqueValue::Float(_) => ValueKind::Number,
            OpaqueValue::BigInt(_) => ValueKind::BigInt,
            OpaqueValue::Identifier(_) => ValueKind::Identifier,
            OpaqueValue::Timestamp(_) => ValueKind::Timestamp,
            OpaqueValue::Binary(_) => ValueKind::Binary,
            OpaqueValue::Callable(_) => ValueKind::Callable,
            OpaqueValue::Stream(_) => ValueKind::Stream,
            OpaqueValue::String(_) => ValueKind::String,
            OpaqueValue::Array(_) => ValueKind::Array,
            OpaqueValue::Object { .. } => ValueKind::Object,
        }
    }

    /// Look up a key on an object. Non-objects have no keys.
    pub fn get(&self, key: &str) -> Option<&OpaqueValue> {
        match self {
            OpaqueValue::Object { entries, .. } => {
                entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    /// Follow a sequence of object keys.
    pub fn pointer<'a>(&'a self, keys: &[&str]) -> Option<&'a OpaqueValue> {
        keys.iter().try_fold(self, |value, key| value.get(key))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OpaqueValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// `null` or missing.
    pub fn is_nullish(&self) -> bool {
        matches!(self, OpaqueValue::Null | OpaqueValue::Missing)
    }

    /// Whether the value counts as present for routing purposes.
    ///
    /// Null, missing, `false`, zero, NaN and the empty string are falsy;
    /// every structured or exotic value is truthy, even when empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            OpaqueValue::Missing | OpaqueValue::Null => false,
            OpaqueValue::Bool(b) => *b,
            OpaqueValue::Int(n) => *n != 0,
            OpaqueValue::Float(f) => *f != 0.0 && !f.is_nan(),
            OpaqueValue::BigInt(digits) => !digits.trim_start_matches(['-', '0']).is_empty(),
            OpaqueValue::String(s) => !s.is_empty(),
            OpaqueValue::Identifier(_)
            | OpaqueValue::Timestamp(_)
            | OpaqueValue::Binary(_)
            | OpaqueValue::Callable(_)
            | OpaqueValue::Stream(_)
            | OpaqueValue::Array(_)
            | OpaqueValue::Object { .. } => true,
        }
    }
}

impl From<serde_json::Value> for OpaqueValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => OpaqueValue::Null,
            Value::Bool(b) => OpaqueValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    OpaqueValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    OpaqueValue::BigInt(u.to_string())
                } else {
                    // Non-integral numbers always have an f64 form without arbitrary_precision.
                    OpaqueValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => OpaqueValue::String(s),
            Value::Array(items) => OpaqueValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => OpaqueValue::Object {
                type_name: None,
                entries: map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            },
        }
    }
}

impl From<&serde_json::Value> for OpaqueValue {
    fn from(value: &serde_json::Value) -> Self {
        OpaqueValue::from(value.clone())
    }
}

impl From<&str> for OpaqueValue {
    fn from(s: &str) -> Self {
        OpaqueValue::String(s.to_string())
    }
}

impl From<String> for OpaqueValue {
    fn from(s: String) -> Self {
        OpaqueValue::String(s)
    }
}

impl From<bool> for OpaqueValue {
    fn from(b: bool) -> Self {
        OpaqueValue::Bool(b)
    }
}

impl From<i64> for OpaqueValue {
    fn from(n: i64) -> Self {
        OpaqueValue::Int(n)
    }
}

impl From<f64> for OpaqueValue {
    fn from(f: f64) -> Self {
        OpaqueValue::Float(f)
    }
}

impl From<DateTime<Utc>> for OpaqueValue {
    fn from(ts: DateTime<Utc>) -> Self {
        OpaqueValue::Timestamp(ts)
    }
}

impl From<Vec<OpaqueValue>> for OpaqueValue {
    fn from(items: Vec<OpaqueValue>) -> Self {
        OpaqueValue::Array(items)
    }
}
