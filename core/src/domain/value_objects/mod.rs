//! Value objects returned by domain operations.

pub mod pin_validation;

pub use pin_validation::{PinOutcome, PinValidation};
