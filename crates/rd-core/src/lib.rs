//! Run digest core library.
//!
//! Consumes a run's event stream and produces a schema summary plus the
//! reconstructed run output:
//! - [`classify`]: root-run filtering and envelope routing
//! - [`digest`]: the per-run consumption loop
//! - [`source`]: JSON-lines envelope reader
//! - [`persist`] and [`paths`]: artifact output
//! - [`logging`] and [`exit_codes`]: CLI plumbing

pub mod classify;
pub mod digest;
pub mod exit_codes;
pub mod logging;
pub mod paths;
pub mod persist;
pub mod source;

pub use classify::{is_top_level_event, EventClassifier, Route};
pub use digest::{DigestOutcome, DigestStats, RunDigest};
pub use source::EnvelopeReader;
