//! Value kind taxonomy.

use serde::{Deserialize, Serialize};

/// Closed classification of observed values.
///
/// Kinds are few, so per-field kind sets are never capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Missing,
    String,
    Number,
    Boolean,
    #[serde(rename = "bigint")]
    BigInt,
    Identifier,
    Timestamp,
    Binary,
    Callable,
    Stream,
    Object,
    Array,
}

impl ValueKind {
    /// Stable lowercase name, as used in schema reports and shape tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Missing => "missing",
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::BigInt => "bigint",
            ValueKind::Identifier => "identifier",
            ValueKind::Timestamp => "timestamp",
            ValueKind::Binary => "binary",
            ValueKind::Callable => "callable",
            ValueKind::Stream => "stream",
            ValueKind::Object => "object",
            ValueKind::Array => "array",
        }
    }

    /// Whether values of this kind are walked into by the schema walker.
    pub fn is_container(&self) -> bool {
        matches!(self, ValueKind::Object | ValueKind::Array)
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
