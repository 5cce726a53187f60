//! Error types for CRUD controllers

use http::StatusCode;
use thiserror::Error;

use crate::lifecycle::RequestState;
use crate::types::EntityId;
use crate::auth::CrudAction;

/// Result type for CRUD operations
pub type Result<T> = std::result::Result<T, CrudError>;

/// Errors that end a CRUD request
#[derive(Debug, Error)]
pub enum CrudError {
    /// No entity with the requested id
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: EntityId },

    /// The principal may not perform the action
    #[error("not authorized to {action} {entity}")]
    Unauthorized { entity: String, action: CrudAction },

    /// A route parameter is missing or malformed
    #[error("invalid route parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    /// Request lifecycle moved backwards or past a terminal state
    #[error("illegal request transition {from} -> {to}")]
    IllegalTransition { from: RequestState, to: RequestState },

    /// Field declaration or attribute validation failed
    #[error(transparent)]
    Fields(#[from] crudpanel_fields::FieldsError),

    /// Controller configuration failed to resolve
    #[error(transparent)]
    Config(#[from] crudpanel_config::ConfigError),

    /// A view descriptor broke its component contract
    #[error(transparent)]
    View(#[from] crudpanel_views::ViewError),

    /// The persistence layer reported an error
    #[error("store error: {message}")]
    Store { message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CrudError {
    pub fn not_found(entity: impl Into<String>, id: EntityId) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id,
        }
    }

    pub fn unauthorized(entity: impl Into<String>, action: CrudAction) -> Self {
        Self::Unauthorized {
            entity: entity.into(),
            action,
        }
    }

    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// HTTP status the web layer should answer with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized { .. } => StatusCode::FORBIDDEN,
            Self::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            Self::Fields(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::IllegalTransition { .. }
            | Self::Config(_)
            | Self::View(_)
            | Self::Store { .. }
            | Self::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Every CRUD error stems from configuration or absent data.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
