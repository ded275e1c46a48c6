//! Errors raised while loading configuration or installing the subscriber

use thiserror::Error;

/// Configuration and startup errors
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// A configuration source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// A value was read but violates a constraint
    #[error("Invalid configuration for {field}: {reason}")]
    Invalid { field: String, reason: String },

    /// The global tracing subscriber could not be installed
    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

impl ConfigurationError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
