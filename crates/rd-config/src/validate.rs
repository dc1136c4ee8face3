//! Configuration validation errors and semantic validation.

use thiserror::Error;

use crate::limits::ProjectionLimits;
use crate::DigestConfig;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

/// Validate a digest configuration semantically.
pub fn validate_config(config: &DigestConfig) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    validate_projection("snapshot", &config.snapshot)?;
    validate_projection("preview", &config.preview)?;

    let schema = &config.schema;
    require_positive("schema.max_examples_per_field", schema.max_examples_per_field)?;
    require_positive("schema.max_depth", schema.max_depth)?;
    require_positive("schema.max_example_length", schema.max_example_length)?;

    if schema.discriminant_fields.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "schema.discriminant_fields".to_string(),
            message: "Must name at least one field".to_string(),
        });
    }
    if let Some(idx) = schema
        .discriminant_fields
        .iter()
        .position(|name| name.trim().is_empty())
    {
        return Err(ValidationError::InvalidValue {
            field: format!("schema.discriminant_fields[{}]", idx),
            message: "Field name must not be blank".to_string(),
        });
    }

    // Snapshots can be as deep as snapshot.max_depth; the merger must be able to walk them.
    if config.merge.max_depth < config.snapshot.max_depth {
        return Err(ValidationError::InvalidValue {
            field: "merge.max_depth".to_string(),
            message: format!(
                "Must be >= snapshot.max_depth ({}), got {}",
                config.snapshot.max_depth, config.merge.max_depth
            ),
        });
    }

    let routing = &config.routing;
    for (field, value) in [
        ("routing.stream_event", &routing.stream_event),
        ("routing.end_event", &routing.end_event),
    ] {
        if value.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: field.to_string(),
                message: "Must not be blank".to_string(),
            });
        }
    }
    if routing.stream_event == routing.end_event {
        return Err(ValidationError::InvalidValue {
            field: "routing.end_event".to_string(),
            message: format!(
                "Must differ from routing.stream_event (both are {:?})",
                routing.end_event
            ),
        });
    }

    Ok(())
}

fn validate_projection(name: &str, limits: &ProjectionLimits) -> ValidationResult<()> {
    require_positive(&format!("{}.max_depth", name), limits.max_depth)?;
    require_positive(&format!("{}.max_array_entries", name), limits.max_array_entries)?;
    require_positive(&format!("{}.max_object_keys", name), limits.max_object_keys)?;
    require_positive(&format!("{}.max_string_length", name), limits.max_string_length)?;
    Ok(())
}

fn require_positive(field: &str, value: usize) -> ValidationResult<()> {
    if value == 0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: "Must be >= 1, got 0".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: ValidationError) -> String {
        match err {
            ValidationError::InvalidValue { field, .. } => field,
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_bound_rejected() {
        let mut config = DigestConfig::default();
        config.preview.max_object_keys = 0;
        let err = validate_config(&config).unwrap_err();
        assert_eq!(field_of(err), "preview.max_object_keys");
    }

    #[test]
    fn test_merge_depth_must_cover_snapshot() {
        let mut config = DigestConfig::default();
        config.merge.max_depth = config.snapshot.max_depth - 1;
        let err = validate_config(&config).unwrap_err();
        assert_eq!(field_of(err), "merge.max_depth");
    }

    #[test]
    fn test_blank_discriminant_rejected() {
        let mut config = DigestConfig::default();
        config.schema.discriminant_fields.push("  ".to_string());
        let err = validate_config(&config).unwrap_err();
        assert_eq!(field_of(err), "schema.discriminant_fields[2]");
    }

    #[test]
    fn test_routing_names_must_differ() {
        let mut config = DigestConfig::default();
        config.routing.end_event = config.routing.stream_event.clone();
        let err = validate_config(&config).unwrap_err();
        assert_eq!(field_of(err), "routing.end_event");
    }

    #[test]
    fn test_version_mismatch() {
        let config = DigestConfig {
            schema_version: "0.9.0".to_string(),
            ..DigestConfig::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert_eq!(err.code(), 66);
    }
}
