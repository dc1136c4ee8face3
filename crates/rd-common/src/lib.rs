//! Run digest common types and errors.
//!
//! This crate provides the foundational types shared across the digest crates:
//! - The opaque input value model and its closed kind taxonomy
//! - Stream envelopes as delivered by the run-streaming source
//! - The run record handed to persistence collaborators
//! - Common error types

pub mod envelope;
pub mod error;
pub mod kind;
pub mod record;
pub mod value;

pub use envelope::{Envelope, EnvelopeKind};
pub use error::{Error, ErrorCategory, Result};
pub use kind::ValueKind;
pub use record::{run_slug, RunRecord};
pub use value::OpaqueValue;
