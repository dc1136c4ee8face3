//! End-to-end digest scenarios through the library API.
//!
//! Covers:
//! - Streaming text reconstruction followed by a completion snapshot
//! - Nested sub-run isolation
//! - Cancellation mid-stream leaving readable state
//! - JSON-lines input including malformed lines

use std::io::Cursor;

use chrono::{TimeZone, Utc};
use rd_common::{Envelope, OpaqueValue};
use rd_config::DigestConfig;
use rd_core::{is_top_level_event, EnvelopeReader, RunDigest};
use rd_merge::merge_final;
use serde_json::json;

fn events(data: serde_json::Value) -> Envelope {
    Envelope::new("events", data)
}

#[test]
fn streamed_text_then_completion() {
    let mut digest = RunDigest::new("root", &DigestConfig::default());
    digest.consume(&events(json!({"event": "on_chain_stream", "name": "root", "data": {"chunk": "Hel"}})));
    digest.consume(&events(json!({"event": "on_chain_stream", "name": "root", "data": {"chunk": "lo"}})));
    assert_eq!(digest.output(), Some(&json!("Hello")));

    digest.consume(&events(json!({"event": "on_chain_end", "name": "root", "data": {"output": "Hello"}})));
    assert_eq!(digest.output(), Some(&json!("Hello")));
    assert_eq!(merge_final(Some(json!("Hello")), json!("Hello")), json!("Hello"));

    let stats = *digest.stats();
    assert_eq!(stats.delta_folds, 2);
    assert_eq!(stats.completion_folds, 1);
}

#[test]
fn classifier_filter_cases() {
    assert!(is_top_level_event(&OpaqueValue::from(json!({"name": "root"})), "root"));
    assert!(!is_top_level_event(
        &OpaqueValue::from(json!({"metadata": {"graph_id": "sub"}})),
        "root"
    ));
    assert!(!is_top_level_event(&OpaqueValue::from(json!({})), "root"));
}

#[test]
fn nested_runs_do_not_touch_output_but_reach_schema() {
    let mut digest = RunDigest::new("root", &DigestConfig::default());
    digest.consume(&events(json!({"event": "on_chain_stream", "name": "root", "data": {"chunk": {"answer": "4"}}})));
    digest.consume(&events(json!({
        "event": "on_chain_end",
        "name": "search_tool",
        "metadata": {"graph_id": "search"},
        "data": {"output": {"answer": "a much longer nested answer"}}
    })));

    assert_eq!(digest.output(), Some(&json!({"answer": "4"})));
    let summary = digest.schema().get("events").unwrap();
    assert_eq!(summary.occurrences, 2);
    let output = summary.field("data.output.answer").unwrap();
    assert_eq!(output.examples, vec!["a much longer nested answer"]);
}

#[test]
fn completion_snapshots_keep_first_complete_view() {
    let mut digest = RunDigest::new("root", &DigestConfig::default());
    digest.consume(&events(json!({
        "event": "on_chain_end", "name": "root",
        "data": {"output": {"messages": ["hi", "there"], "status": "done"}}
    })));
    digest.consume(&events(json!({
        "event": "on_chain_end", "metadata": {"graph_id": "root"},
        "data": {"outputs": {"messages": ["hi"], "status": "wip", "extra": 1}}
    })));
    assert_eq!(
        digest.output(),
        Some(&json!({"messages": ["hi", "there"], "status": "done", "extra": 1}))
    );
}

#[test]
fn exotic_chunks_are_merged_in_projected_form() {
    let mut digest = RunDigest::new("root", &DigestConfig::default());
    let chunk = OpaqueValue::object([
        ("id", OpaqueValue::BigInt("123456789012345678901234567890".into())),
        ("at", OpaqueValue::Timestamp(Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap())),
        ("callback", OpaqueValue::Callable(None)),
    ]);
    let envelope = Envelope::new(
        "events",
        OpaqueValue::object([
            ("event", OpaqueValue::from("on_chain_stream")),
            ("name", OpaqueValue::from("root")),
            ("data", OpaqueValue::object([("chunk", chunk)])),
        ]),
    );
    digest.consume(&envelope);
    assert_eq!(
        digest.output(),
        Some(&json!({
            "id": "BigInt(123456789012345678901234567890)",
            "at": "2026-05-01T00:00:00.000Z",
            "callback": "[Function]",
        }))
    );
}

#[test]
fn cancelled_stream_leaves_valid_state() {
    let mut digest = RunDigest::new("root", &DigestConfig::default());
    let stream = (0..100).map(|i| {
        events(json!({"event": "on_chain_stream", "name": "root", "data": {"chunk": format!("{} ", i)}}))
    });
    // Source aborts after three envelopes.
    digest.consume_all(stream.take(3));
    assert_eq!(digest.output(), Some(&json!("0 1 2 ")));

    let outcome = digest.finish(Utc::now());
    assert_eq!(outcome.record.output, Some(json!("0 1 2 ")));
    assert_eq!(outcome.schema[0].occurrences, 3);
}

#[test]
fn jsonl_input_with_bad_line() {
    let input = concat!(
        "{\"event\":\"metadata\",\"data\":{\"run_id\":\"run-42\"}}\n",
        "{\"event\":\"events\",\"data\":{\"event\":\"on_chain_stream\",\"name\":\"root\",\"data\":{\"chunk\":\"Hel\"}}}\n",
        "{oops\n",
        "\n",
        "{\"event\":\"events\",\"data\":{\"event\":\"on_chain_stream\",\"name\":\"root\",\"data\":{\"chunk\":\"lo\"}}}\n",
    );
    let mut digest = RunDigest::new("root", &DigestConfig::default());
    let mut malformed = Vec::new();
    for item in EnvelopeReader::new(Cursor::new(input)) {
        match item {
            Ok(envelope) => digest.consume(&envelope),
            Err(e) => malformed.push(e),
        }
    }
    assert_eq!(malformed.len(), 1);
    assert!(malformed[0].is_recoverable());
    assert_eq!(digest.run_id(), Some("run-42"));
    assert_eq!(digest.output(), Some(&json!("Hello")));
}
