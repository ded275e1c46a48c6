//! Business services containing domain logic and use cases.

pub mod pin;

// Re-export commonly used types
pub use pin::{
    create_pin_record, create_pin_record_with_expiry, generate_pin, generate_secure_pin,
    increment_pin_attempts, validate_pin, validate_pin_at, PinPolicy, PinVerificationService,
};
