//! Structured logging for the run-digest binary.
//!
//! Provides dual-mode logging:
//! - Human-readable console output for interactive use
//! - Machine-parseable JSONL for pipelines
//!
//! stdout is reserved for command payloads (the schema summary, config
//! dumps); every log line goes to stderr. Library crates only emit through
//! the `tracing` facade; the subscriber is installed here, once, by `main`.

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber writing to stderr.
///
/// Returns `false` when one was already installed; the existing subscriber
/// stays in place.
pub fn init_logging(config: &LogConfig) -> bool {
    let filter = EnvFilter::default().add_directive(config.level.filter().into());
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Human => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_ansi(std::io::stderr().is_terminal()),
            )
            .try_init()
            .is_ok(),
        LogFormat::Jsonl => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .is_ok(),
    }
}

/// Generate a short correlation id for one digest.
pub fn generate_correlation_id() -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("digest-{}", &uuid[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlation_id_shape() {
        let id = generate_correlation_id();
        assert!(id.starts_with("digest-"));
        let hex = &id["digest-".len()..];
        assert_eq!(hex.len(), 12);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, generate_correlation_id());
    }
}
