//! The value projector.
//!
//! `project` walks an opaque value once and builds a bounded JSON copy of it.
//! The walk is pure: no state survives between calls, and there is no input
//! for which it fails.

use rd_common::OpaqueValue;
use rd_config::ProjectionLimits;
use serde_json::{Map, Number, Value};

use crate::sentinel;

/// Depth/size-bounded projection of opaque values into JSON.
#[derive(Debug, Clone)]
pub struct ValueProjector {
    limits: ProjectionLimits,
}

impl ValueProjector {
    pub fn new(limits: ProjectionLimits) -> Self {
        Self { limits }
    }

    /// Projector with the default snapshot bounds (used before merging).
    pub fn snapshot() -> Self {
        Self::new(ProjectionLimits::snapshot())
    }

    /// Projector with the default preview bounds (used for schema examples).
    pub fn preview() -> Self {
        Self::new(ProjectionLimits::preview())
    }

    pub fn limits(&self) -> &ProjectionLimits {
        &self.limits
    }

    /// Project an opaque value into bounded JSON.
    ///
    /// Guarantees, for every input:
    /// - any node at depth `>= max_depth` is [`sentinel::TRUNCATED`]
    /// - arrays keep `<= max_array_entries` items (plus one "+N more" marker)
    /// - objects keep `<= max_object_keys` keys (plus one overflow key)
    /// - strings keep `<= max_string_length` characters (plus an ellipsis)
    pub fn project(&self, value: &OpaqueValue) -> Value {
        self.project_at(value, 0)
    }

    /// Project a JSON value, applying the same bounds.
    pub fn project_json(&self, value: &Value) -> Value {
        self.project(&OpaqueValue::from(value))
    }

    /// Project and flatten to a compact JSON string.
    ///
    /// `None` only when serialization fails; callers treat that as "no
    /// rendering available" and carry on.
    pub fn render(&self, value: &OpaqueValue) -> Option<String> {
        serde_json::to_string(&self.project(value)).ok()
    }

    fn project_at(&self, value: &OpaqueValue, depth: usize) -> Value {
        if depth >= self.limits.max_depth {
            return Value::String(sentinel::TRUNCATED.to_string());
        }

        match value {
            OpaqueValue::Missing => Value::String(sentinel::MISSING.to_string()),
            OpaqueValue::Null => Value::Null,
            OpaqueValue::Bool(b) => Value::Bool(*b),
            OpaqueValue::Int(n) => Value::Number(Number::from(*n)),
            OpaqueValue::Float(f) => match Number::from_f64(*f) {
                Some(n) => Value::Number(n),
                None => Value::String(sentinel::non_finite(*f)),
            },
            OpaqueValue::BigInt(digits) => Value::String(sentinel::big_int(&self.cut(digits))),
            OpaqueValue::Identifier(desc) => {
                let desc = desc.as_deref().map(|d| self.cut(d));
                Value::String(sentinel::identifier(desc.as_deref()))
            }
            OpaqueValue::Timestamp(ts) => Value::String(sentinel::timestamp(ts)),
            OpaqueValue::Binary(bytes) => Value::String(sentinel::binary(bytes.len())),
            OpaqueValue::Callable(_) => Value::String(sentinel::CALLABLE.to_string()),
            OpaqueValue::Stream(_) => Value::String(sentinel::STREAM.to_string()),
            OpaqueValue::String(s) => Value::String(self.cut(s)),
            OpaqueValue::Array(items) => self.project_array(items, depth),
            OpaqueValue::Object { entries, .. } => self.project_object(entries, depth),
        }
    }

    /// Marker payloads are cut like plain strings; the wrapper is fixed-size.
    fn cut(&self, text: &str) -> String {
        sentinel::truncate_str(text, self.limits.max_string_length)
    }

    fn project_array(&self, items: &[OpaqueValue], depth: usize) -> Value {
        let limit = self.limits.max_array_entries;
        let mut out: Vec<Value> = items
            .iter()
            .take(limit)
            .map(|item| self.project_at(item, depth + 1))
            .collect();
        if items.len() > limit {
            out.push(Value::String(sentinel::more_entries(items.len() - limit)));
        }
        Value::Array(out)
    }

    fn project_object(&self, entries: &[(String, OpaqueValue)], depth: usize) -> Value {
        let limit = self.limits.max_object_keys;
        let mut out = Map::new();
        for (key, child) in entries.iter().take(limit) {
            out.insert(key.clone(), self.project_at(child, depth + 1));
        }
        if entries.len() > limit {
            out.insert(
                sentinel::OVERFLOW_KEY.to_string(),
                Value::String(sentinel::more_keys(entries.len() - limit)),
            );
        }
        Value::Object(out)
    }
}

impl Default for ValueProjector {
    fn default() -> Self {
        Self::snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn small() -> ValueProjector {
        ValueProjector::new(ProjectionLimits {
            max_depth: 3,
            max_array_entries: 2,
            max_object_keys: 2,
            max_string_length: 5,
        })
    }

    #[test]
    fn test_json_natives_pass_through() {
        let value = json!({"a": 1, "b": [true, null], "c": "hi"});
        let mut limits = ProjectionLimits::snapshot();
        limits.max_object_keys = 10;
        let projector = ValueProjector::new(limits);
        assert_eq!(projector.project_json(&value), value);
    }

    #[test]
    fn test_array_overflow_marker() {
        let projected = small().project_json(&json!([1, 2, 3, 4, 5]));
        assert_eq!(projected, json!([1, 2, "[+3 more]"]));
    }

    #[test]
    fn test_object_overflow_marker() {
        let projected = small().project_json(&json!({"a": 1, "b": 2, "c": 3}));
        assert_eq!(projected, json!({"a": 1, "b": 2, "__truncated__": "[+1 keys]"}));
    }

    #[test]
    fn test_string_truncation() {
        assert_eq!(small().project_json(&json!("abcdefgh")), json!("abcde…"));
        assert_eq!(small().project_json(&json!("abc")), json!("abc"));
    }

    #[test]
    fn test_depth_ceiling() {
        let projected = small().project_json(&json!({"a": {"b": {"c": {"d": 1}}}}));
        assert_eq!(projected, json!({"a": {"b": {"c": "[Truncated]"}}}));
    }

    #[test]
    fn test_zero_depth_truncates_root() {
        let projector = ValueProjector::new(ProjectionLimits {
            max_depth: 0,
            ..ProjectionLimits::snapshot()
        });
        assert_eq!(projector.project_json(&json!(1)), json!("[Truncated]"));
    }

    #[test]
    fn test_exotic_values() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let value = OpaqueValue::object([
            ("missing", OpaqueValue::Missing),
            ("big", OpaqueValue::BigInt("123456789012345678901234567890".into())),
            ("sym", OpaqueValue::Identifier(Some("tok".into()))),
            ("nan", OpaqueValue::Float(f64::NAN)),
            ("inf", OpaqueValue::Float(f64::NEG_INFINITY)),
            ("when", OpaqueValue::Timestamp(ts)),
            ("blob", OpaqueValue::Binary(vec![0; 42])),
            ("cb", OpaqueValue::Callable(Some("handler".into()))),
            ("pipe", OpaqueValue::Stream(None)),
        ]);
        let projector = ValueProjector::new(ProjectionLimits {
            max_object_keys: 20,
            ..ProjectionLimits::snapshot()
        });
        assert_eq!(
            projector.project(&value),
            json!({
                "missing": "undefined",
                "big": "BigInt(123456789012345678901234567890)",
                "sym": "Symbol(tok)",
                "nan": "Number(NaN)",
                "inf": "Number(-Infinity)",
                "when": "2026-03-01T08:00:00.000Z",
                "blob": "[Binary length=42]",
                "cb": "[Function]",
                "pipe": "[ReadableStream]",
            })
        );
    }

    #[test]
    fn test_marker_payloads_are_cut() {
        let value = OpaqueValue::object([
            ("sym", OpaqueValue::Identifier(Some("d".repeat(10_000)))),
            ("big", OpaqueValue::BigInt("9".repeat(10_000))),
        ]);
        let projected = ValueProjector::preview().project(&value);
        let cut = |c: &str| format!("{}…", c.repeat(60));
        assert_eq!(projected["sym"], json!(format!("Symbol({})", cut("d"))));
        assert_eq!(projected["big"], json!(format!("BigInt({})", cut("9"))));
    }

    #[test]
    fn test_type_name_is_not_projected() {
        let value = OpaqueValue::typed_object("AIMessage", [("content", OpaqueValue::from("hey"))]);
        assert_eq!(small().project(&value), json!({"content": "hey"}));
    }

    #[test]
    fn test_render() {
        let rendered = small().render(&OpaqueValue::from(json!({"k": [1, 2, 3]}))).unwrap();
        assert_eq!(rendered, r#"{"k":[1,2,"[+1 more]"]}"#);
    }
}
