//! Logging configuration.
//!
//! Level and format come from, lowest precedence first:
//! - built-in defaults (human output at `info`)
//! - `RUST_LOG`, whose global directive only (`info` in `info,hyper=warn`)
//! - `RUN_DIGEST_LOG` / `RUN_DIGEST_LOG_FORMAT`
//! - CLI flags (`--log-level`, `--log-format`, `-v`, `-q`)

use std::fmt;
use std::str::FromStr;

use tracing_subscriber::filter::LevelFilter;

pub const ENV_LOG_LEVEL: &str = "RUN_DIGEST_LOG";
pub const ENV_LOG_FORMAT: &str = "RUN_DIGEST_LOG_FORMAT";
const ENV_RUST_LOG: &str = "RUST_LOG";

/// Where log lines go is fixed (stderr); this picks their shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Human,
    /// One JSON object per line.
    Jsonl,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" | "pretty" => Ok(LogFormat::Human),
            "jsonl" | "json" => Ok(LogFormat::Jsonl),
            other => Err(format!("unknown log format {:?} (expected human or jsonl)", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogFormat::Human => "human",
            LogFormat::Jsonl => "jsonl",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    const NAMES: [(&'static str, LogLevel); 6] = [
        ("trace", LogLevel::Trace),
        ("debug", LogLevel::Debug),
        ("info", LogLevel::Info),
        ("warn", LogLevel::Warn),
        ("error", LogLevel::Error),
        ("off", LogLevel::Off),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }

    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Off => LevelFilter::OFF,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let name = match name.as_str() {
            "warning" => "warn",
            "none" | "quiet" => "off",
            other => other,
        };
        Self::NAMES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, level)| *level)
            .ok_or_else(|| format!("unknown log level {:?}", s))
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The global level in a `RUST_LOG` value.
///
/// Target directives (`hyper=warn`) are skipped; when several global
/// directives appear the last one wins, as with `EnvFilter`.
fn rust_log_level(value: &str) -> Option<LogLevel> {
    value
        .rsplit(',')
        .map(str::trim)
        .filter(|directive| !directive.contains('='))
        .find_map(|directive| directive.parse().ok())
}

/// Effective logging settings for one process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
}

impl LogConfig {
    /// Read the process environment, then apply CLI overrides.
    pub fn from_env(cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self {
        Self::from_env_with(cli_level, cli_format, |key| std::env::var(key).ok())
    }

    pub fn from_env_with<F>(cli_level: Option<LogLevel>, cli_format: Option<LogFormat>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_level = env(ENV_LOG_LEVEL)
            .and_then(|v| v.parse().ok())
            .or_else(|| env(ENV_RUST_LOG).and_then(|v| rust_log_level(&v)));
        let env_format = env(ENV_LOG_FORMAT).and_then(|v| v.parse().ok());

        LogConfig {
            format: cli_format.or(env_format).unwrap_or_default(),
            level: cli_level.or(env_level).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Jsonl);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Human);
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("quiet".parse::<LogLevel>().unwrap(), LogLevel::Off);
        assert_eq!(" Debug ".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Error.to_string(), "error");
    }

    #[test]
    fn test_defaults_without_env() {
        let config = LogConfig::from_env_with(None, None, |_| None);
        assert_eq!(config, LogConfig::default());
        assert_eq!(config.level, LogLevel::Info);
    }

    #[test]
    fn test_digest_env_beats_rust_log() {
        let config = LogConfig::from_env_with(
            None,
            None,
            env_of(&[(ENV_LOG_LEVEL, "warn"), ("RUST_LOG", "trace")]),
        );
        assert_eq!(config.level, LogLevel::Warn);
    }

    #[test]
    fn test_rust_log_uses_global_directive_only() {
        let config = LogConfig::from_env_with(None, None, env_of(&[("RUST_LOG", "info,hyper=warn")]));
        assert_eq!(config.level, LogLevel::Info);

        let config = LogConfig::from_env_with(None, None, env_of(&[("RUST_LOG", "rd_core=trace,debug")]));
        assert_eq!(config.level, LogLevel::Debug);

        let config = LogConfig::from_env_with(None, None, env_of(&[("RUST_LOG", "rd_core=error")]));
        assert_eq!(config.level, LogLevel::Info);
    }

    #[test]
    fn test_unparseable_digest_env_falls_back_to_rust_log() {
        let config = LogConfig::from_env_with(
            None,
            None,
            env_of(&[(ENV_LOG_LEVEL, "loud"), ("RUST_LOG", "error")]),
        );
        assert_eq!(config.level, LogLevel::Error);
    }

    #[test]
    fn test_cli_overrides_env() {
        let config = LogConfig::from_env_with(
            Some(LogLevel::Error),
            Some(LogFormat::Human),
            env_of(&[(ENV_LOG_LEVEL, "trace"), (ENV_LOG_FORMAT, "jsonl")]),
        );
        assert_eq!(config.level, LogLevel::Error);
        assert_eq!(config.format, LogFormat::Human);
    }

    #[test]
    fn test_filter_mapping() {
        assert_eq!(LogLevel::Off.filter(), LevelFilter::OFF);
        assert_eq!(LogLevel::Trace.filter(), LevelFilter::TRACE);
    }
}
