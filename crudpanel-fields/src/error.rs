//! Error types for field definitions and the field registry

use std::path::PathBuf;
use thiserror::Error;

/// Result type for field operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur while declaring, validating or looking up fields
#[derive(Debug, Error)]
pub enum FieldsError {
    /// A required attribute has neither an explicit value nor a default
    #[error("field '{field}' is missing required attribute '{attribute}'")]
    MissingRequiredAttribute { field: String, attribute: String },

    /// An explicit attribute is not in the kind's available set
    #[error("field '{field}' sets unknown attribute '{attribute}'")]
    UnknownAttribute { field: String, attribute: String },

    /// Two fields share the same id within one registry
    #[error("duplicate field id: {id}")]
    DuplicateFieldId { id: String },

    /// Field lookup by id failed
    #[error("unknown field: {id}")]
    UnknownField { id: String },

    /// No schema row declared for a field kind
    #[error("unknown field kind: {kind}")]
    UnknownKind { kind: String },

    /// A schema row breaks the defaults/required ⊆ available contract
    #[error("invalid schema for kind '{kind}': {message}")]
    InvalidSchema { kind: String, message: String },

    /// Schema file could not be read
    #[error("failed to read schema file {path}: {source}")]
    SchemaFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl FieldsError {
    /// Create a missing required attribute error
    pub fn missing_required(field: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingRequiredAttribute {
            field: field.into(),
            attribute: attribute.into(),
        }
    }

    /// Create an unknown attribute error
    pub fn unknown_attribute(field: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::UnknownAttribute {
            field: field.into(),
            attribute: attribute.into(),
        }
    }

    /// Create an invalid schema error
    pub fn invalid_schema(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// The id of the field this error is reported against, if any
    pub fn field_id(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredAttribute { field, .. } | Self::UnknownAttribute { field, .. } => {
                Some(field)
            }
            Self::DuplicateFieldId { id } | Self::UnknownField { id } => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FieldsError::UnknownField { id: "title".into() };
        assert_eq!(err.to_string(), "unknown field: title");
    }

    #[test]
    fn test_missing_required_names_field_and_attribute() {
        let err = FieldsError::missing_required("range", "max");
        assert!(err.to_string().contains("range"));
        assert!(err.to_string().contains("max"));
        assert_eq!(err.field_id(), Some("range"));
    }

    #[test]
    fn test_schema_errors_have_no_field() {
        let err = FieldsError::invalid_schema("range", "default 'x' is not available");
        assert_eq!(err.field_id(), None);
    }
}
