//! PIN verification services
//!
//! - `engine` - stateless functions that generate, create, validate and
//!   increment PIN records
//! - `policy` - the same operations bound to a `PinPolicyConfig`
//! - `service` - issue/verify flow on top of a record repository with
//!   per-identity serialisation

mod engine;
mod policy;
mod service;

#[cfg(test)]
mod tests;

pub use engine::{
    create_pin_record, create_pin_record_with_expiry, evaluate_pin_at, generate_pin,
    generate_secure_pin, increment_pin_attempts, validate_pin, validate_pin_at,
};
pub use policy::PinPolicy;
pub use service::PinVerificationService;
