//! Output path resolution.
//!
//! Each artifact path resolves CLI flag → environment variable → default
//! under [`DEFAULT_OUTPUT_DIR`]. Relative overrides resolve against the
//! working directory.

use std::path::{Path, PathBuf};

pub const ENV_SCHEMA_PATH: &str = "EVENT_SCHEMA_PATH";
pub const ENV_RECORD_PATH: &str = "EVENT_STREAM_PATH";
pub const ENV_AGGREGATE_PATH: &str = "EVENT_AGGREGATE_PATH";

pub const DEFAULT_OUTPUT_DIR: &str = "schema-snapshots";
const AGGREGATE_SUFFIX: &str = "-aggregated.jsonl";

/// Paths given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub schema: Option<PathBuf>,
    pub record: Option<PathBuf>,
    pub aggregate: Option<PathBuf>,
}

/// Where the digest artifacts go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Pretty schema summary.
    pub schema: PathBuf,
    /// Pretty run record.
    pub record: PathBuf,
    /// Append-only JSONL log of run records across runs.
    pub aggregate: PathBuf,
}

impl OutputPaths {
    /// Resolve against the process environment.
    pub fn resolve(overrides: &PathOverrides, run_identifier: &str, slug: &str, cwd: &Path) -> Self {
        Self::resolve_with(overrides, run_identifier, slug, cwd, |key| std::env::var(key).ok())
    }

    /// Resolve with an injectable environment lookup.
    pub fn resolve_with<F>(
        overrides: &PathOverrides,
        run_identifier: &str,
        slug: &str,
        cwd: &Path,
        env: F,
    ) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |cli: &Option<PathBuf>, key: &str, default: String| -> PathBuf {
            let chosen = cli
                .clone()
                .or_else(|| env(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from));
            match chosen {
                Some(path) => cwd.join(path),
                None => cwd.join(DEFAULT_OUTPUT_DIR).join(default),
            }
        };

        Self {
            schema: pick(
                &overrides.schema,
                ENV_SCHEMA_PATH,
                format!("{}-{}.json", run_identifier, slug),
            ),
            record: pick(
                &overrides.record,
                ENV_RECORD_PATH,
                format!("{}-{}-events.json", run_identifier, slug),
            ),
            aggregate: pick(
                &overrides.aggregate,
                ENV_AGGREGATE_PATH,
                format!("{}{}", run_identifier, AGGREGATE_SUFFIX),
            ),
        }
    }
}
