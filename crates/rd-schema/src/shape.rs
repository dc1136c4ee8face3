//! Shape tags.
//!
//! A shape tag is a short label for the top-level form of a payload. Objects
//! are labelled by the first string-valued discriminant field found in the
//! priority table, then by their type name, then plainly as "object".

use rd_common::OpaqueValue;

/// Fallback label for objects with neither discriminant nor type name.
pub const PLAIN_OBJECT: &str = "object";

/// Describe the top-level shape of `value`.
pub fn describe_shape(value: &OpaqueValue, discriminants: &[String]) -> String {
    match value {
        OpaqueValue::Object { type_name, .. } => discriminants
            .iter()
            .find_map(|field| value.get(field).and_then(OpaqueValue::as_str))
            .or(type_name.as_deref())
            .unwrap_or(PLAIN_OBJECT)
            .to_string(),
        other => other.kind().as_str().to_string(),
    }
}
