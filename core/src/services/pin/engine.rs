//! Stateless PIN policy engine
//!
//! Nothing here stores a record or touches shared state. Callers keep
//! records wherever they like and hand them back in for validation.

use chrono::Utc;
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};

use crate::domain::entities::pin_record::{PinRecord, DEFAULT_EXPIRY_MINUTES, PIN_MAX, PIN_MIN};
use crate::domain::value_objects::pin_validation::{PinOutcome, PinValidation};

/// Generate a 6-digit PIN uniformly from [100000, 999999]
///
/// Uses the thread-local general-purpose RNG, which is not suitable for
/// high-assurance flows. See `generate_secure_pin`.
pub fn generate_pin() -> String {
    rand::thread_rng().gen_range(PIN_MIN..=PIN_MAX).to_string()
}

/// Generate a 6-digit PIN from the OS CSPRNG
pub fn generate_secure_pin() -> String {
    OsRng.gen_range(PIN_MIN..=PIN_MAX).to_string()
}

/// Create a record for `pin` that expires in 10 minutes
pub fn create_pin_record(pin: impl Into<String>) -> PinRecord {
    create_pin_record_with_expiry(pin, DEFAULT_EXPIRY_MINUTES)
}

/// Create a record for `pin` that expires in `expiry_minutes`
///
/// Fractional minutes are rounded to the nearest millisecond. The PIN is
/// not checked; callers pass well-formed input.
pub fn create_pin_record_with_expiry(pin: impl Into<String>, expiry_minutes: f64) -> PinRecord {
    PinRecord::new(pin, expiry_minutes)
}

/// Validate `input_pin` against a stored record at the current time
pub fn validate_pin(stored_record: Option<&PinRecord>, input_pin: &str) -> PinValidation {
    validate_pin_at(stored_record, input_pin, Utc::now().timestamp_millis())
}

/// Validate `input_pin` against a stored record at `now_ms`
pub fn validate_pin_at(
    stored_record: Option<&PinRecord>,
    input_pin: &str,
    now_ms: i64,
) -> PinValidation {
    evaluate_pin_at(stored_record, input_pin, now_ms).into()
}

/// Classify a submission. Rules are checked in order and the first match wins:
/// missing record, expiry, attempt ceiling, PIN mismatch.
pub fn evaluate_pin_at(stored_record: Option<&PinRecord>, input_pin: &str, now_ms: i64) -> PinOutcome {
    let Some(record) = stored_record else {
        return PinOutcome::NoRecord;
    };

    if record.is_expired_at(now_ms) {
        return PinOutcome::Expired;
    }

    if record.is_locked() {
        return PinOutcome::Locked;
    }

    if !pins_match(record.pin(), input_pin) {
        return PinOutcome::Incorrect {
            remaining_attempts: record.max_attempts() - record.attempts() - 1,
        };
    }

    PinOutcome::Valid
}

/// Return a copy of `record` with one more failed attempt
///
/// No ceiling is applied; validation keeps rejecting a record whose
/// counter has passed `max_attempts`.
pub fn increment_pin_attempts(record: &PinRecord) -> PinRecord {
    record.with_incremented_attempts()
}

fn pins_match(stored: &str, provided: &str) -> bool {
    if stored.len() != provided.len() {
        return false;
    }
    constant_time_eq(stored.as_bytes(), provided.as_bytes())
}
