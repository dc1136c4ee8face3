//! Configuration path resolution.
//!
//! Resolution order: CLI argument → environment variable → built-in defaults.
//! An explicitly named file that cannot be read is an error, not a silent
//! fallback to defaults.

use std::path::{Path, PathBuf};

use crate::validate::ValidationResult;
use crate::DigestConfig;

/// Environment variable naming a config file.
pub const ENV_CONFIG_PATH: &str = "RUN_DIGEST_CONFIG";

/// Where the effective configuration came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// A loaded configuration together with its provenance.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: DigestConfig,
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}

impl ResolvedConfig {
    /// Resolve the config path from the process environment and load it.
    pub fn load(cli_path: Option<&Path>) -> ValidationResult<Self> {
        let (path, source) = resolve_config_path(cli_path);
        Self::load_from(path, source)
    }

    /// Load from an already-resolved path (`None` means built-in defaults).
    pub fn load_from(path: Option<PathBuf>, source: ConfigSource) -> ValidationResult<Self> {
        let config = match &path {
            Some(p) => DigestConfig::load(p)?,
            None => DigestConfig::default(),
        };
        Ok(Self {
            config,
            path,
            source,
        })
    }
}

/// Resolve which config file to use, reading the process environment.
pub fn resolve_config_path(cli_path: Option<&Path>) -> (Option<PathBuf>, ConfigSource) {
    resolve_config_path_with(cli_path, |key| std::env::var(key).ok())
}

/// Resolve which config file to use with an injectable environment lookup.
pub fn resolve_config_path_with<F>(cli_path: Option<&Path>, env: F) -> (Option<PathBuf>, ConfigSource)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = cli_path {
        return (Some(path.to_path_buf()), ConfigSource::CliArgument);
    }

    if let Some(value) = env(ENV_CONFIG_PATH).filter(|v| !v.trim().is_empty()) {
        return (Some(PathBuf::from(value)), ConfigSource::Environment);
    }

    (None, ConfigSource::BuiltinDefault)
}
