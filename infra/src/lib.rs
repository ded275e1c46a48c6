//! # Infrastructure Layer
//!
//! Concrete storage for PIN records. The domain crate defines the
//! `PinRecordRepository` contract; this crate implements it on Redis.
//!
//! ## Modules
//!
//! - **cache**: Redis client with retry logic and the Redis record repository

pub mod cache;

pub use cache::{RedisClient, RedisPinRecordRepository};

use pv_core::errors::DomainError;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Stored value could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Storage {
            message: err.to_string(),
        }
    }
}
