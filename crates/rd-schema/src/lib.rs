//! Schema inference for streamed run events.
//!
//! The registry keeps one [`EventSummary`] per event type and folds every
//! payload into it without retaining the payload itself. Per-field example
//! sets are capped, so memory stays bounded however long the stream runs.
//!
//! ```
//! use rd_schema::SchemaRegistry;
//! use serde_json::json;
//!
//! let mut registry = SchemaRegistry::default();
//! registry.record_json("events", &json!({"event": "on_chain_start", "data": {"input": "hi"}}));
//!
//! let summary = registry.get("events").unwrap();
//! assert_eq!(summary.occurrences, 1);
//! assert!(summary.field("data.input").is_some());
//! ```

pub mod example;
pub mod path;
pub mod registry;
pub mod shape;
pub mod summary;

pub use registry::SchemaRegistry;
pub use summary::{EventSummary, FieldSummary};
