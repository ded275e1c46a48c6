//! Shared utilities and common types for the PIN verification services
//!
//! This crate provides functionality used across the server crates:
//! - Layered configuration (defaults, config files, environment)
//! - Tracing subscriber setup
//! - Identity masking and PIN format helpers

pub mod config;
pub mod errors;
pub mod telemetry;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, CacheConfig, Environment, LogFormat, LoggingConfig, PinPolicyConfig};
pub use errors::ConfigurationError;
pub use telemetry::init_tracing;
pub use utils::{identity, pin};
