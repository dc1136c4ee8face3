//! Resource bounds for each digest component.
//!
//! Every field has a serde default, so a config file only needs to name the
//! bounds it changes.

use serde::{Deserialize, Serialize};

/// Bounds for one projector configuration.
///
/// Two configurations are used in practice: [`ProjectionLimits::snapshot`]
/// (applied to fragments before they are merged) and
/// [`ProjectionLimits::preview`] (used to render schema examples).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionLimits {
    /// Nodes at this depth or deeper are replaced by the truncation sentinel.
    pub max_depth: usize,
    /// Arrays keep at most this many entries, plus a "+N more" marker.
    pub max_array_entries: usize,
    /// Objects keep at most this many keys, plus a "+N keys" marker.
    pub max_object_keys: usize,
    /// Strings keep at most this many characters, plus an ellipsis.
    pub max_string_length: usize,
}

impl ProjectionLimits {
    /// Larger bounds protecting memory before fragments are merged.
    pub const fn snapshot() -> Self {
        Self {
            max_depth: 10,
            max_array_entries: 25,
            max_object_keys: 25,
            max_string_length: 65_536,
        }
    }

    /// Small bounds for human-readable example strings.
    pub const fn preview() -> Self {
        Self {
            max_depth: 3,
            max_array_entries: 3,
            max_object_keys: 8,
            max_string_length: 60,
        }
    }
}

impl Default for ProjectionLimits {
    fn default() -> Self {
        Self::snapshot()
    }
}

/// Bounds for the schema registry walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaLimits {
    /// Distinct example strings kept per field path.
    pub max_examples_per_field: usize,
    /// Deepest node depth recorded (the root payload is depth 0).
    pub max_depth: usize,
    /// Structured examples are cut to this many characters.
    pub max_example_length: usize,
    /// Field names tried, in order, to find a string discriminant for shape tags.
    pub discriminant_fields: Vec<String>,
}

impl Default for SchemaLimits {
    fn default() -> Self {
        Self {
            max_examples_per_field: 4,
            max_depth: 5,
            max_example_length: 240,
            discriminant_fields: vec!["type".to_string(), "__typename".to_string()],
        }
    }
}

/// Bounds for the fragment merger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeLimits {
    /// Recursion depth at which a merged subtree becomes the truncation sentinel.
    pub max_depth: usize,
}

impl Default for MergeLimits {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

/// Names used to route envelopes to the merger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Nested event discriminant for streamed delta chunks.
    pub stream_event: String,
    /// Nested event discriminant for chain/step completion.
    pub end_event: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            stream_event: "on_chain_stream".to_string(),
            end_event: "on_chain_end".to_string(),
        }
    }
}
