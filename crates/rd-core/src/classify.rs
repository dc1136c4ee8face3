//! Envelope classification and routing.
//!
//! Only fragments from the root run feed the merger. Nested sub-runs share
//! the stream, so every `events` envelope is checked against the run
//! identifier before its kind-specific routing applies.

use rd_common::{Envelope, EnvelopeKind, OpaqueValue};
use rd_config::RoutingConfig;

/// Where an envelope goes after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum Route<'a> {
    /// Metadata envelope carrying the executor-assigned run id.
    RunId(String),
    /// Streamed chunk for the delta policy.
    Delta(&'a OpaqueValue),
    /// Completion payload for the final-snapshot policy.
    Completion(&'a OpaqueValue),
    /// Event from a nested sub-run.
    Nested,
    /// Nothing for the merger.
    Ignored,
}

/// True when the event payload originates from the root run.
///
/// Matches either the declared `name` or `metadata.graph_id`. Payloads
/// without either field never match.
pub fn is_top_level_event(data: &OpaqueValue, run_identifier: &str) -> bool {
    let name = data.get("name").and_then(OpaqueValue::as_str);
    let graph_id = data
        .pointer(&["metadata", "graph_id"])
        .and_then(OpaqueValue::as_str);
    name == Some(run_identifier) || graph_id == Some(run_identifier)
}

/// Label for a node in log output.
///
/// First of `metadata.langgraph_node`, `name`, the `metadata.langgraph_path`
/// segments joined with `" -> "`, else `"unknown-node"`.
pub fn node_label(data: &OpaqueValue) -> String {
    if let Some(node) = data
        .pointer(&["metadata", "langgraph_node"])
        .and_then(OpaqueValue::as_str)
    {
        return node.to_string();
    }
    if let Some(name) = data.get("name").and_then(OpaqueValue::as_str) {
        return name.to_string();
    }
    if let Some(OpaqueValue::Array(segments)) = data.pointer(&["metadata", "langgraph_path"]) {
        let parts: Vec<String> = segments.iter().filter_map(path_segment).collect();
        if !parts.is_empty() {
            return parts.join(" -> ");
        }
    }
    "unknown-node".to_string()
}

fn path_segment(value: &OpaqueValue) -> Option<String> {
    match value {
        OpaqueValue::String(s) => Some(s.clone()),
        OpaqueValue::Int(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Routes envelopes of one run.
#[derive(Debug, Clone)]
pub struct EventClassifier {
    run_identifier: String,
    routing: RoutingConfig,
}

impl EventClassifier {
    pub fn new(run_identifier: impl Into<String>, routing: RoutingConfig) -> Self {
        Self {
            run_identifier: run_identifier.into(),
            routing,
        }
    }

    pub fn run_identifier(&self) -> &str {
        &self.run_identifier
    }

    pub fn routing(&self) -> &RoutingConfig {
        &self.routing
    }

    pub fn is_top_level_event(&self, data: &OpaqueValue) -> bool {
        is_top_level_event(data, &self.run_identifier)
    }

    /// Nested event discriminant (`data.event`) of an `events` payload.
    pub fn nested_event<'a>(&self, data: &'a OpaqueValue) -> Option<&'a str> {
        data.get("event").and_then(OpaqueValue::as_str)
    }

    /// True for an end-of-step event, regardless of which run emitted it.
    pub fn is_end_event(&self, data: &OpaqueValue) -> bool {
        self.nested_event(data) == Some(self.routing.end_event.as_str())
    }

    /// Decide where an envelope goes.
    pub fn route<'a>(&self, envelope: &'a Envelope) -> Route<'a> {
        let data = &envelope.data;
        match envelope.kind() {
            EnvelopeKind::Metadata => match data.get("run_id").and_then(OpaqueValue::as_str) {
                Some(run_id) => Route::RunId(run_id.to_string()),
                None => Route::Ignored,
            },
            EnvelopeKind::Events => {
                if !self.is_top_level_event(data) {
                    return Route::Nested;
                }
                let event = self.nested_event(data);
                if event == Some(self.routing.stream_event.as_str()) {
                    match data.pointer(&["data", "chunk"]) {
                        Some(chunk) if chunk.is_truthy() => Route::Delta(chunk),
                        _ => Route::Ignored,
                    }
                } else if event == Some(self.routing.end_event.as_str()) {
                    completion_payload(data).map_or(Route::Ignored, Route::Completion)
                } else {
                    Route::Ignored
                }
            }
            EnvelopeKind::Other(_) => Route::Ignored,
        }
    }
}

/// First of `data.output`, `data.outputs`, `data` that carries a value.
fn completion_payload(event: &OpaqueValue) -> Option<&OpaqueValue> {
    let inner = event.get("data")?;
    [inner.get("output"), inner.get("outputs"), Some(inner)]
        .into_iter()
        .flatten()
        .find(|candidate| !candidate.is_nullish())
}
