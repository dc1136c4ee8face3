//! Sentinel markers.
//!
//! Fixed placeholder strings substituted for values that cannot be represented
//! faithfully within the configured bounds. This module is the single source
//! of truth for their spelling.

use chrono::{DateTime, SecondsFormat, Utc};

/// Replaces any subtree at or below the depth ceiling.
pub const TRUNCATED: &str = "[Truncated]";

/// Stands in for a missing value.
pub const MISSING: &str = "undefined";

/// Callable values keep only their type.
pub const CALLABLE: &str = "[Function]";

/// Stream and handle-like values keep only their type.
pub const STREAM: &str = "[ReadableStream]";

/// Key added to objects that had more keys than allowed.
pub const OVERFLOW_KEY: &str = "__truncated__";

/// Appended to strings cut at the length bound.
pub const ELLIPSIS: char = '…';

pub fn big_int(digits: &str) -> String {
    format!("BigInt({})", digits)
}

pub fn identifier(description: Option<&str>) -> String {
    format!("Symbol({})", description.unwrap_or(""))
}

/// Marker for NaN and the infinities.
pub fn non_finite(value: f64) -> String {
    let label = if value.is_nan() {
        "NaN"
    } else if value.is_sign_positive() {
        "Infinity"
    } else {
        "-Infinity"
    };
    format!("Number({})", label)
}

/// RFC 3339 with millisecond precision and a `Z` suffix.
pub fn timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn binary(len: usize) -> String {
    format!("[Binary length={}]", len)
}

/// Trailing array entry recording dropped items.
pub fn more_entries(dropped: usize) -> String {
    format!("[+{} more]", dropped)
}

/// Value under [`OVERFLOW_KEY`] recording dropped keys.
pub fn more_keys(dropped: usize) -> String {
    format!("[+{} keys]", dropped)
}

/// Cut a string to `limit` characters, appending [`ELLIPSIS`] when cut.
///
/// Counts characters, not bytes, so a multi-byte character is never split.
pub fn truncate_str(value: &str, limit: usize) -> String {
    match value.char_indices().nth(limit) {
        Some((byte_idx, _)) => {
            let mut cut = String::with_capacity(byte_idx + ELLIPSIS.len_utf8());
            cut.push_str(&value[..byte_idx]);
            cut.push(ELLIPSIS);
            cut
        }
        None => value.to_string(),
    }
}
