//! Schema summary types.
//!
//! Sets are kept as vectors in first-observation order. Kind sets hold at most
//! a dozen entries and example sets are capped, so linear membership checks
//! stay cheap.

use rd_common::ValueKind;
use serde::{Deserialize, Serialize};

/// Observed kinds and examples for one field path within an event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSummary {
    /// Dotted/bracketed path, e.g. `data.output[0].role`.
    pub path: String,
    pub value_kinds: Vec<ValueKind>,
    /// Distinct example strings, never more than the configured cap.
    pub examples: Vec<String>,
}

impl FieldSummary {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value_kinds: Vec::new(),
            examples: Vec::new(),
        }
    }

    /// Add a kind. Returns whether the set grew.
    pub fn observe_kind(&mut self, kind: ValueKind) -> bool {
        if self.value_kinds.contains(&kind) {
            return false;
        }
        self.value_kinds.push(kind);
        true
    }

    /// Add an example unless the set is full or already holds it.
    /// Returns whether the set grew.
    pub fn offer_example(&mut self, example: String, cap: usize) -> bool {
        if self.examples.len() >= cap || self.examples.contains(&example) {
            return false;
        }
        self.examples.push(example);
        true
    }

    pub fn has_kind(&self, kind: ValueKind) -> bool {
        self.value_kinds.contains(&kind)
    }
}

/// Accumulated summary for one event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub event_type: String,
    pub occurrences: u64,
    pub shape_tags: Vec<String>,
    pub fields: Vec<FieldSummary>,
}

impl EventSummary {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            occurrences: 0,
            shape_tags: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Look up a field by path.
    pub fn field(&self, path: &str) -> Option<&FieldSummary> {
        self.fields.iter().find(|f| f.path == path)
    }

    /// Add a shape tag. Returns whether the set grew.
    pub fn observe_shape(&mut self, tag: String) -> bool {
        if self.shape_tags.contains(&tag) {
            return false;
        }
        self.shape_tags.push(tag);
        true
    }

    /// Field paths in first-observation order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_example_cap_and_dedup() {
        let mut field = FieldSummary::new("data.chunk");
        assert!(field.offer_example("a".into(), 2));
        assert!(!field.offer_example("a".into(), 2));
        assert!(field.offer_example("b".into(), 2));
        assert!(!field.offer_example("c".into(), 2));
        assert_eq!(field.examples, vec!["a", "b"]);
    }

    #[test]
    fn test_kind_set_semantics() {
        let mut field = FieldSummary::new("x");
        assert!(field.observe_kind(ValueKind::String));
        assert!(!field.observe_kind(ValueKind::String));
        assert!(field.observe_kind(ValueKind::Null));
        assert!(field.has_kind(ValueKind::Null));
        assert_eq!(field.value_kinds.len(), 2);
    }

    #[test]
    fn test_serialized_shape() {
        let mut summary = EventSummary::new("events");
        summary.occurrences = 2;
        summary.observe_shape("object".into());
        let mut field = FieldSummary::new("event");
        field.observe_kind(ValueKind::BigInt);
        field.offer_example("on_chain_end".into(), 4);
        summary.fields.push(field);

        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({
                "event_type": "events",
                "occurrences": 2,
                "shape_tags": ["object"],
                "fields": [{"path": "event", "value_kinds": ["bigint"], "examples": ["on_chain_end"]}],
            })
        );
    }
}
