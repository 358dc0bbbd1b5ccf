//! Configuration errors.

use super::error_code::{self, MotifErrorCode};

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Invalid config value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("{field} requires a {collaborator} but none was supplied")]
    MissingCollaborator { field: String, collaborator: String },
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl MotifErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingCollaborator { .. } => error_code::MISSING_COLLABORATOR,
            _ => error_code::CONFIG_ERROR,
        }
    }
}
