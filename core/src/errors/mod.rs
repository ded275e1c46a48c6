//! Domain-specific error types.
//!
//! The policy engine itself never fails; these errors come from the
//! service layer and from record storage.

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal {
            message: format!("Serialization failed: {}", err),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
