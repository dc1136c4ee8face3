//! The schema registry.

use std::collections::HashMap;

use rd_common::OpaqueValue;
use rd_config::{ProjectionLimits, SchemaLimits};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::example::ExampleRenderer;
use crate::path::{child_index, child_key};
use crate::shape::describe_shape;
use crate::summary::{EventSummary, FieldSummary};

/// Per-event-type state: the summary plus an index over its field paths.
#[derive(Debug, Clone)]
struct EventState {
    summary: EventSummary,
    field_index: HashMap<String, usize>,
}

impl EventState {
    fn new(event_type: &str) -> Self {
        Self {
            summary: EventSummary::new(event_type),
            field_index: HashMap::new(),
        }
    }

    fn field_mut(&mut self, path: String) -> &mut FieldSummary {
        let fields = &mut self.summary.fields;
        let idx = *self.field_index.entry(path).or_insert_with_key(|path| {
            fields.push(FieldSummary::new(path.clone()));
            fields.len() - 1
        });
        &mut fields[idx]
    }
}

/// Incrementally inferred schema for every event type seen in a run.
///
/// Owned by a single consumption loop; no payload outlives the `record` call
/// that observed it.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    limits: SchemaLimits,
    max_array_entries: usize,
    examples: ExampleRenderer,
    events: Vec<EventState>,
    index: HashMap<String, usize>,
}

impl SchemaRegistry {
    /// Create a registry. `preview` bounds example rendering and the number of
    /// array entries walked.
    pub fn new(limits: SchemaLimits, preview: ProjectionLimits) -> Self {
        let examples = ExampleRenderer::new(preview, limits.max_example_length);
        Self {
            max_array_entries: preview.max_array_entries,
            limits,
            examples,
            events: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn limits(&self) -> &SchemaLimits {
        &self.limits
    }

    /// Fold one payload into the summary for `event_type`.
    pub fn record(&mut self, event_type: &str, payload: &OpaqueValue) {
        let slot = match self.index.get(event_type) {
            Some(&slot) => slot,
            None => {
                debug!(event_type = %event_type, "first observation of event type");
                self.events.push(EventState::new(event_type));
                self.index.insert(event_type.to_string(), self.events.len() - 1);
                self.events.len() - 1
            }
        };

        let shape = describe_shape(payload, &self.limits.discriminant_fields);
        let state = &mut self.events[slot];
        state.summary.occurrences += 1;
        state.summary.observe_shape(shape);

        let walker = Walker {
            limits: &self.limits,
            max_array_entries: self.max_array_entries,
            examples: &self.examples,
        };
        walker.walk(state, payload, String::new(), 0);
    }

    /// Convenience for JSON payloads.
    pub fn record_json(&mut self, event_type: &str, payload: &serde_json::Value) {
        self.record(event_type, &OpaqueValue::from(payload));
    }

    /// Snapshot of the summary for one event type.
    pub fn get(&self, event_type: &str) -> Option<EventSummary> {
        self.index
            .get(event_type)
            .map(|&slot| self.events[slot].summary.clone())
    }

    /// Snapshot of every summary, in first-observation order.
    pub fn summaries(&self) -> Vec<EventSummary> {
        self.events.iter().map(|s| s.summary.clone()).collect()
    }

    /// Event types seen so far, in first-observation order.
    pub fn event_types(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|s| s.summary.event_type.as_str())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new(SchemaLimits::default(), ProjectionLimits::preview())
    }
}

impl Serialize for SchemaRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.events.iter().map(|s| &s.summary))
    }
}

/// Borrowed view of the bounds used during one payload walk.
struct Walker<'a> {
    limits: &'a SchemaLimits,
    max_array_entries: usize,
    examples: &'a ExampleRenderer,
}

impl Walker<'_> {
    fn walk(&self, state: &mut EventState, value: &OpaqueValue, path: String, depth: usize) {
        if depth > self.limits.max_depth {
            return;
        }

        if !path.is_empty() {
            let example = self.examples.render(value);
            let field = state.field_mut(path.clone());
            field.observe_kind(value.kind());
            match example {
                Some(example) => {
                    field.offer_example(example, self.limits.max_examples_per_field);
                }
                None => debug!(path = %path, "no example rendering available"),
            }
        }

        match value {
            OpaqueValue::Array(items) => {
                for (idx, item) in items.iter().take(self.max_array_entries).enumerate() {
                    self.walk(state, item, child_index(&path, idx), depth + 1);
                }
            }
            OpaqueValue::Object { entries, .. } => {
                for (key, child) in entries {
                    self.walk(state, child, child_key(&path, key), depth + 1);
                }
            }
            _ => {}
        }
    }
}
