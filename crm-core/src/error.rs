//! Error types for the crm workspace.

use thiserror::Error;

/// Errors that can occur in crm operations.
#[derive(Error, Debug)]
pub enum CrmError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing WooCommerce credentials: {0}")]
    MissingCredentials(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Invalid value: {0}")]
    Parse(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CrmError {
    fn from(err: serde_json::Error) -> Self {
        CrmError::Serialization(err.to_string())
    }
}

/// Result type alias for crm operations.
pub type CrmResult<T> = Result<T, CrmError>;
