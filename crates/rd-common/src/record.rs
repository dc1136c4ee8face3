//! Run records handed to persistence collaborators.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// The reconstructed result of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Identifier of the root run (the assistant/graph name events are filtered on).
    pub run_identifier: String,
    /// Filesystem-safe start timestamp, used to name per-run artifacts.
    pub run_slug: String,
    pub recorded_at: DateTime<Utc>,
    /// Executor-assigned run id, when a metadata envelope supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    /// Aggregated output, absent when no fragment reached the merger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,
}

/// Filesystem-safe slug for a timestamp: RFC 3339 (milliseconds, `Z`) with
/// `:` and `.` replaced by `-`.
pub fn run_slug(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_run_slug() {
        let at = Utc.with_ymd_and_hms(2026, 1, 15, 14, 30, 22).unwrap();
        assert_eq!(run_slug(at), "2026-01-15T14-30-22-000Z");
    }

    #[test]
    fn test_optional_fields_skipped() {
        let at = Utc.with_ymd_and_hms(2026, 1, 15, 14, 30, 22).unwrap();
        let record = RunRecord {
            run_identifier: "agent".to_string(),
            run_slug: run_slug(at),
            recorded_at: at,
            run_id: None,
            output: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("run_id").is_none());
        assert!(json.get("output").is_none());
        assert_eq!(json["run_identifier"], "agent");
    }
}
