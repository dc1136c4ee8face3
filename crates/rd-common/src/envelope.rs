//! Stream envelopes.
//!
//! One envelope is one unit delivered by the run-streaming source: a kind tag
//! plus an opaque payload. On the wire (JSON lines) an envelope looks like
//! `{"event": "events", "data": {...}}`; `kind` is accepted in place of `event`.

use serde::Deserialize;

use crate::value::OpaqueValue;

/// Envelope kinds the digest distinguishes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnvelopeKind {
    /// Carries run metadata (the run id).
    Metadata,
    /// Carries an executor event (stream chunk, step end, ...).
    Events,
    /// Anything else. Recorded in the schema, never merged.
    Other(String),
}

impl EnvelopeKind {
    pub fn parse(s: &str) -> Self {
        match s {
            "metadata" => EnvelopeKind::Metadata,
            "events" => EnvelopeKind::Events,
            other => EnvelopeKind::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for EnvelopeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvelopeKind::Metadata => write!(f, "metadata"),
            EnvelopeKind::Events => write!(f, "events"),
            EnvelopeKind::Other(name) => write!(f, "{}", name),
        }
    }
}

/// A single unit from the event stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "WireEnvelope")]
pub struct Envelope {
    /// Raw kind tag, also the event type under which the schema records it.
    pub kind: String,
    pub data: OpaqueValue,
}

impl Envelope {
    pub fn new(kind: impl Into<String>, data: impl Into<OpaqueValue>) -> Self {
        Self {
            kind: kind.into(),
            data: data.into(),
        }
    }

    pub fn kind(&self) -> EnvelopeKind {
        EnvelopeKind::parse(&self.kind)
    }
}

#[derive(Deserialize)]
struct WireEnvelope {
    #[serde(alias = "kind")]
    event: String,
    #[serde(default, deserialize_with = "present")]
    data: Option<serde_json::Value>,
}

/// Keeps an explicit `null` distinct from an absent field.
fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl From<WireEnvelope> for Envelope {
    fn from(wire: WireEnvelope) -> Self {
        Self {
            kind: wire.event,
            data: wire.data.map(OpaqueValue::from).unwrap_or(OpaqueValue::Missing),
        }
    }
}
