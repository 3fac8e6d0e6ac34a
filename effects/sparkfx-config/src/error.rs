//! Error handling for emitter configuration loading

use std::io;
use thiserror::Error;

/// Errors that can occur while loading an emitter configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The named source could not be found by the resolver
    #[error("Configuration source not found: {name}.{extension}")]
    NotFound {
        /// Name of the requested source
        name: String,
        /// Extension derived from the requested source kind
        extension: &'static str,
    },

    /// The type tag does not name a supported configuration format
    #[error("Unsupported configuration format: '{0}'")]
    UnsupportedFormat(String),

    /// An I/O error occurred while reading the source
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source is not a well-formed JSON emitter document
    #[error("Malformed JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The source is not a well-formed YAML emitter document
    #[error("Malformed YAML configuration: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A field is present but its value cannot be used
    #[error("Invalid value for '{field}': {reason}")]
    InvalidField {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Type alias for Results from configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ConfigError::NotFound {
            name: "explosion".to_string(),
            extension: "json",
        };
        assert_eq!(
            error.to_string(),
            "Configuration source not found: explosion.json"
        );

        let error = ConfigError::invalid("maxParticles", "must be greater than zero");
        assert_eq!(
            error.to_string(),
            "Invalid value for 'maxParticles': must be greater than zero"
        );

        let error = ConfigError::UnsupportedFormat("pex".to_string());
        assert_eq!(error.to_string(), "Unsupported configuration format: 'pex'");
    }
}
