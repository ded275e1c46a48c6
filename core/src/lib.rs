//! # PIN Verify Core
//!
//! Domain layer for one-time PIN verification: the `PinRecord` entity,
//! the stateless policy engine that generates and validates PINs, the
//! repository contract for record storage, and the verification service
//! that drives a record through its lifecycle.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{PinOutcome, PinRecord, PinValidation};
pub use errors::{DomainError, DomainResult};
pub use repositories::{MemoryPinRecordRepository, PinRecordRepository};
pub use services::{
    create_pin_record, create_pin_record_with_expiry, generate_pin, generate_secure_pin,
    increment_pin_attempts, validate_pin, validate_pin_at, PinPolicy, PinVerificationService,
};
