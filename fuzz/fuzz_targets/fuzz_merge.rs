//! Fuzz target for fragment merging.
//!
//! Splits the input into two JSON documents and merges them both ways.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rd_merge::{merge_delta, merge_final};

fuzz_target!(|data: &[u8]| {
    let Some(split) = data.iter().position(|b| *b == b'\n') else {
        return;
    };
    let (Ok(existing), Ok(incoming)) = (
        serde_json::from_slice::<serde_json::Value>(&data[..split]),
        serde_json::from_slice::<serde_json::Value>(&data[split + 1..]),
    ) else {
        return;
    };
    let _ = merge_delta(Some(existing.clone()), incoming.clone());
    let merged = merge_final(Some(existing), incoming.clone());
    // A completion snapshot merged into itself is a fixed point.
    assert_eq!(merge_final(Some(merged.clone()), merged.clone()), merged);
    let _ = merge_final(None, incoming);
});
