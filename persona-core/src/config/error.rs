//! Configuration error types

use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in '{path}' at line {}, column {}: {message}",
            .line.unwrap_or(0), .column.unwrap_or(0))]
    Parse {
        path: String,
        line: Option<usize>,
        column: Option<usize>,
        message: String,
    },

    #[error("environment variable '{var}' not found")]
    EnvVarNotFound { var: String },

    #[error("validation failed at '{field_path}': {message}")]
    Validation { field_path: String, message: String },
}

impl ConfigError {
    /// Helper to create a validation error
    pub fn validation(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field_path: field_path.into(),
            message: message.into(),
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
