//! Error types for controller configuration

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Section key not declared by the controller's configuration schema
    #[error("unknown config section: {key}")]
    UnknownSection { key: String },

    /// Framework defaults could not be parsed
    #[error("failed to parse configuration: {source}")]
    ParseError { source: Box<figment::Error> },

    /// Configuration file format not supported
    #[error("unsupported configuration file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// A section holds a value of the wrong shape
    #[error("invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    pub fn unknown_section(key: impl Into<String>) -> Self {
        Self::UnknownSection { key: key.into() }
    }

    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::ParseError {
            source: Box::new(error),
        }
    }
}
