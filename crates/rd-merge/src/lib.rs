//! Fragment merging for streamed run outputs.
//!
//! Two total merge policies over projected JSON values:
//! - [`merge_delta`]: streaming append. Strings concatenate, containers merge
//!   member-wise, anything else is replaced by the incoming fragment.
//! - [`merge_final`]: completion snapshot. The more complete view wins while
//!   unique substructure from both sides is kept; on conflicts the earlier
//!   snapshot takes precedence.
//!
//! [`AggregatedOutput`] holds the running result for one run.
//!
//! ```
//! use rd_merge::{merge_delta, merge_final};
//! use serde_json::json;
//!
//! let text = merge_delta(Some(json!("Hel")), json!("lo"));
//! assert_eq!(text, json!("Hello"));
//!
//! let both = merge_final(Some(json!({"a": 1})), json!({"b": 2}));
//! assert_eq!(both, json!({"b": 2, "a": 1}));
//! ```

pub mod aggregate;
pub mod merger;

pub use aggregate::AggregatedOutput;
pub use merger::{merge_delta, merge_final, FragmentMerger};
pub use rd_config::MergeLimits;
