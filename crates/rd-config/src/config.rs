//! Top-level digest configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::limits::{MergeLimits, ProjectionLimits, RoutingConfig, SchemaLimits};
use crate::validate::{validate_config, ValidationError, ValidationResult};

/// Complete configuration for one run digest.
///
/// Sections may be omitted and fall back to their defaults. A projection
/// section, when present, must name all four bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigestConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Projection applied to fragments before merging.
    #[serde(default = "ProjectionLimits::snapshot")]
    pub snapshot: ProjectionLimits,

    /// Projection used to render schema examples.
    #[serde(default = "ProjectionLimits::preview")]
    pub preview: ProjectionLimits,

    #[serde(default)]
    pub schema: SchemaLimits,

    #[serde(default)]
    pub merge: MergeLimits,

    #[serde(default)]
    pub routing: RoutingConfig,
}

fn default_schema_version() -> String {
    crate::CONFIG_SCHEMA_VERSION.to_string()
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            snapshot: ProjectionLimits::snapshot(),
            preview: ProjectionLimits::preview(),
            schema: SchemaLimits::default(),
            merge: MergeLimits::default(),
            routing: RoutingConfig::default(),
        }
    }
}

impl DigestConfig {
    /// Load and validate a config file.
    ///
    /// `.toml` files are parsed as TOML, everything else as JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> ValidationResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ValidationError::IoError(format!("{}: {}", path.display(), e)))?;

        let is_toml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        let config = if is_toml {
            Self::from_toml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };

        validate_config(&config)?;
        Ok(config)
    }

    /// Parse TOML without validating.
    pub fn from_toml_str(content: &str) -> ValidationResult<Self> {
        toml::from_str(content).map_err(|e| ValidationError::ParseError(e.to_string()))
    }

    /// Parse JSON without validating.
    pub fn from_json_str(content: &str) -> ValidationResult<Self> {
        serde_json::from_str(content).map_err(|e| ValidationError::ParseError(e.to_string()))
    }

    /// Run semantic validation.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_config(self)
    }
}
