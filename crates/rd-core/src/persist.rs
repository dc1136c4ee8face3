//! Writing digest artifacts to disk.
//!
//! Every writer creates missing parent directories first.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use rd_common::{Error, Result, RunRecord};
use serde::Serialize;
use tracing::info;

fn persist_err(path: &Path, source: std::io::Error) -> Error {
    Error::Persist {
        path: path.display().to_string(),
        source,
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| persist_err(parent, e))
        }
        _ => Ok(()),
    }
}

fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    let body = serde_json::to_string_pretty(value)?;
    fs::write(path, body).map_err(|e| persist_err(path, e))
}

/// Write the schema summary as pretty JSON.
pub fn write_schema<T: Serialize + ?Sized>(path: &Path, schema: &T) -> Result<()> {
    write_pretty(path, schema)?;
    info!(path = %path.display(), "schema saved");
    Ok(())
}

/// Write the run record as pretty JSON.
pub fn write_record(path: &Path, record: &RunRecord) -> Result<()> {
    write_pretty(path, record)?;
    info!(path = %path.display(), "run record saved");
    Ok(())
}

/// Append the run record as one compact JSON line.
pub fn append_record(path: &Path, record: &RunRecord) -> Result<()> {
    ensure_parent(path)?;
    let mut line = serde_json::to_string(record)?;
    line.push('\n');
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| persist_err(path, e))?;
    file.write_all(line.as_bytes())
        .map_err(|e| persist_err(path, e))?;
    info!(path = %path.display(), "run record appended");
    Ok(())
}
