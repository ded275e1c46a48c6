//! Domain entities representing core business objects.

pub mod pin_record;

#[cfg(test)]
mod tests;

pub use pin_record::{
    minutes_to_millis, PinRecord, DEFAULT_EXPIRY_MINUTES, MAX_ATTEMPTS, MILLIS_PER_MINUTE,
    PIN_MAX, PIN_MIN,
};
