//! Bounded value projection for the run digest.
//!
//! This crate turns arbitrary opaque payload values into finite, acyclic,
//! size-bounded JSON. Both the schema registry and the fragment merger go
//! through it, with different bounds.
//!
//! # Key Features
//!
//! - **Total**: every input projects; nothing here returns an error.
//! - **Bounded**: depth, array length, object width and string length are
//!   all capped, with sentinel markers recording what was dropped.
//! - **Exotic-value tolerant**: big integers, identifiers, non-finite
//!   numbers, timestamps, binary blobs, callables and stream handles each
//!   map to one fixed sentinel rule.
//!
//! # Example
//!
//! ```
//! use rd_common::OpaqueValue;
//! use rd_project::ValueProjector;
//!
//! let projector = ValueProjector::preview();
//! let long = OpaqueValue::from("x".repeat(500));
//! let projected = projector.project(&long);
//! assert!(projected.as_str().unwrap().ends_with('…'));
//! ```

pub mod projector;
pub mod sentinel;

pub use projector::ValueProjector;
pub use rd_config::ProjectionLimits;
