//! Unit tests for the stateless PIN engine

use chrono::Utc;
use std::collections::HashSet;

use crate::domain::entities::pin_record::{
    PinRecord, MAX_ATTEMPTS, MILLIS_PER_MINUTE, PIN_MAX, PIN_MIN,
};
use crate::domain::value_objects::pin_validation::PinOutcome;
use crate::services::pin::{
    create_pin_record, create_pin_record_with_expiry, evaluate_pin_at, generate_pin,
    generate_secure_pin, increment_pin_attempts, validate_pin, validate_pin_at,
};

const NOW: i64 = 1_700_000_000_000;

fn assert_pin_shape(pin: &str) {
    assert_eq!(pin.len(), 6);
    assert!(pin.chars().all(|c| c.is_ascii_digit()));
    let value: u32 = pin.parse().expect("PIN should be numeric");
    assert!((PIN_MIN..=PIN_MAX).contains(&value));
}

#[test]
fn test_generate_pin_format() {
    for _ in 0..1000 {
        assert_pin_shape(&generate_pin());
    }
}

#[test]
fn test_generate_secure_pin_format() {
    for _ in 0..1000 {
        assert_pin_shape(&generate_secure_pin());
    }
}

#[test]
fn test_generated_pins_vary() {
    let pins: HashSet<String> = (0..100).map(|_| generate_pin()).collect();
    assert!(pins.len() > 1);
}

#[test]
fn test_create_pin_record_defaults() {
    let before = Utc::now().timestamp_millis();
    let record = create_pin_record("482913");
    let after = Utc::now().timestamp_millis();

    assert_eq!(record.pin(), "482913");
    assert!(record.expiry_time() >= before + 10 * MILLIS_PER_MINUTE);
    assert!(record.expiry_time() <= after + 10 * MILLIS_PER_MINUTE);
    assert_eq!(record.attempts(), 0);
    assert_eq!(record.max_attempts(), 5);
}

#[test]
fn test_create_pin_record_with_expiry() {
    let before = Utc::now().timestamp_millis();
    let record = create_pin_record_with_expiry("482913", 3.0);
    let after = Utc::now().timestamp_millis();

    assert!(record.expiry_time() >= before + 3 * MILLIS_PER_MINUTE);
    assert!(record.expiry_time() <= after + 3 * MILLIS_PER_MINUTE);
}

#[test]
fn test_create_pin_record_with_sub_minute_expiry() {
    let before = Utc::now().timestamp_millis();
    let record = create_pin_record_with_expiry("482913", 0.5);
    let after = Utc::now().timestamp_millis();

    assert!(record.expiry_time() >= before + 30_000);
    assert!(record.expiry_time() <= after + 30_000);
}

#[test]
fn test_validate_missing_record() {
    let result = validate_pin(None, "123456");
    assert!(!result.valid);
    assert_eq!(result.message, "No PIN record found");
    assert_eq!(result.remaining_attempts, None);
}

#[test]
fn test_expiry_checked_before_match() {
    let record = PinRecord::from_parts("482913", NOW - 1, 0, MAX_ATTEMPTS);
    let result = validate_pin_at(Some(&record), "482913", NOW);

    assert!(!result.valid);
    assert_eq!(result.message, "PIN has expired. Please register again.");
    assert_eq!(result.remaining_attempts, None);
}

#[test]
fn test_expiry_checked_before_ceiling() {
    let record = PinRecord::from_parts("482913", NOW - 1, MAX_ATTEMPTS, MAX_ATTEMPTS);
    assert_eq!(evaluate_pin_at(Some(&record), "000000", NOW), PinOutcome::Expired);
}

#[test]
fn test_expiry_instant_is_still_valid() {
    let record = PinRecord::from_parts("482913", NOW, 0, MAX_ATTEMPTS);
    assert!(validate_pin_at(Some(&record), "482913", NOW).valid);
    assert!(!validate_pin_at(Some(&record), "482913", NOW + 1).valid);
}

#[test]
fn test_locked_regardless_of_input() {
    let record = PinRecord::from_parts("482913", NOW + MILLIS_PER_MINUTE, 5, 5);

    for input in ["482913", "000000", ""] {
        let result = validate_pin_at(Some(&record), input, NOW);
        assert!(!result.valid);
        assert_eq!(
            result.message,
            "Maximum PIN attempts exceeded. Please register again."
        );
        assert_eq!(result.remaining_attempts, None);
    }
}

#[test]
fn test_incorrect_and_correct_pin() {
    let record = PinRecord::new_at("482913", 10.0, NOW);

    let wrong = validate_pin_at(Some(&record), "000000", NOW);
    assert!(!wrong.valid);
    assert_eq!(wrong.message, "PIN is incorrect");
    assert_eq!(wrong.remaining_attempts, Some(4));

    let right = validate_pin_at(Some(&record), "482913", NOW);
    assert!(right.valid);
    assert_eq!(right.message, "PIN is valid");
    assert_eq!(right.remaining_attempts, None);
}

#[test]
fn test_remaining_attempts_counts_down() {
    let mut record = PinRecord::new_at("482913", 10.0, NOW);
    let mut seen = Vec::new();

    for _ in 0..MAX_ATTEMPTS {
        let result = validate_pin_at(Some(&record), "000000", NOW);
        seen.push(result.remaining_attempts.unwrap());
        record = increment_pin_attempts(&record);
    }

    assert_eq!(seen, vec![4, 3, 2, 1, 0]);
    assert_eq!(
        evaluate_pin_at(Some(&record), "482913", NOW),
        PinOutcome::Locked
    );
}

#[test]
fn test_mismatched_length_is_incorrect() {
    let record = PinRecord::new_at("482913", 10.0, NOW);
    assert!(!validate_pin_at(Some(&record), "4829130", NOW).valid);
    assert!(!validate_pin_at(Some(&record), "48291", NOW).valid);
}

#[test]
fn test_validate_is_idempotent() {
    let record = PinRecord::new_at("482913", 10.0, NOW);
    let snapshot = record.clone();

    let first = validate_pin_at(Some(&record), "000000", NOW);
    let second = validate_pin_at(Some(&record), "000000", NOW);

    assert_eq!(first, second);
    assert_eq!(record, snapshot);
}

#[test]
fn test_increment_is_pure() {
    let record = PinRecord::new_at("482913", 10.0, NOW);
    let snapshot = record.clone();

    let incremented = increment_pin_attempts(&record);

    assert_eq!(record, snapshot);
    assert_eq!(incremented.attempts(), record.attempts() + 1);
    assert_eq!(incremented.pin(), record.pin());
    assert_eq!(incremented.expiry_time(), record.expiry_time());
    assert_eq!(incremented.max_attempts(), record.max_attempts());
}
