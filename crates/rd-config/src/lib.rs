//! Run digest configuration loading and validation.
//!
//! This crate provides:
//! - Typed bounds for the projector, schema registry and merger
//! - Config file loading (TOML or JSON)
//! - Semantic validation
//! - Config path resolution (CLI → env → defaults)

pub mod config;
pub mod limits;
pub mod resolve;
pub mod validate;

pub use config::DigestConfig;
pub use limits::{MergeLimits, ProjectionLimits, RoutingConfig, SchemaLimits};
pub use resolve::{resolve_config_path, ConfigSource, ResolvedConfig};
pub use validate::{ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
