//! Error types for view descriptors

use thiserror::Error;

/// Result type for view operations
pub type Result<T> = std::result::Result<T, ViewError>;

#[derive(Debug, Error)]
pub enum ViewError {
    /// A descriptor passes a prop its component does not declare
    #[error("component '{component}' has no prop '{prop}'")]
    UnknownProp { component: String, prop: String },

    /// A descriptor targets a different component than the contract
    #[error("descriptor renders '{actual}', expected '{expected}'")]
    ComponentMismatch { expected: String, actual: String },
}
