//! Fuzz target for JSON-lines envelope reading.
//!
//! Arbitrary bytes must yield envelopes or recoverable errors, and every
//! envelope that comes out must digest without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rd_config::DigestConfig;
use rd_core::{EnvelopeReader, RunDigest};

fuzz_target!(|data: &[u8]| {
    let mut digest = RunDigest::new("root", &DigestConfig::default());
    for item in EnvelopeReader::new(data) {
        match item {
            Ok(envelope) => digest.consume(&envelope),
            Err(e) => assert!(e.is_recoverable(), "unexpected fatal error: {}", e),
        }
    }
    let _ = digest.finish(chrono::Utc::now());
});
