//! Unit tests for the PIN record entity

use chrono::Utc;

use crate::domain::entities::pin_record::{
    minutes_to_millis, PinRecord, DEFAULT_EXPIRY_MINUTES, MAX_ATTEMPTS, MILLIS_PER_MINUTE,
};

const NOW: i64 = 1_700_000_000_000;

#[test]
fn test_new_record() {
    let record = PinRecord::new_at("482913", DEFAULT_EXPIRY_MINUTES, NOW);

    assert_eq!(record.pin(), "482913");
    assert_eq!(record.expiry_time(), NOW + 10 * MILLIS_PER_MINUTE);
    assert_eq!(record.attempts(), 0);
    assert_eq!(record.max_attempts(), MAX_ATTEMPTS);
    assert_eq!(record.remaining_attempts(), 5);
    assert!(!record.is_locked());
}

#[test]
fn test_new_uses_wall_clock() {
    let before = Utc::now().timestamp_millis();
    let record = PinRecord::new("482913", 10.0);
    let after = Utc::now().timestamp_millis();

    assert!(record.expiry_time() >= before + 10 * MILLIS_PER_MINUTE);
    assert!(record.expiry_time() <= after + 10 * MILLIS_PER_MINUTE);
    assert!(!record.is_expired());
}

#[test]
fn test_malformed_pin_passes_through() {
    let record = PinRecord::new_at("12ab", 10.0, NOW);
    assert_eq!(record.pin(), "12ab");
}

#[test]
fn test_expiry_boundary() {
    let record = PinRecord::new_at("482913", 1.0, NOW);
    let expiry = record.expiry_time();

    assert!(!record.is_expired_at(expiry - 1));
    assert!(!record.is_expired_at(expiry));
    assert!(record.is_expired_at(expiry + 1));
    assert_eq!(record.millis_until_expiry_at(expiry - 250), 250);
    assert_eq!(record.millis_until_expiry_at(expiry + 250), 0);
}

#[test]
fn test_fractional_minutes_round_to_nearest_millisecond() {
    assert_eq!(minutes_to_millis(0.5), 30_000);
    assert_eq!(minutes_to_millis(1.0 / 60_000.0 * 2.4), 2);
    assert_eq!(minutes_to_millis(f64::NAN), 0);

    let record = PinRecord::new_at("482913", 0.25, NOW);
    assert_eq!(record.expiry_time(), NOW + 15_000);
    assert!(!record.is_expired_at(NOW + 15_000));
    assert!(record.is_expired_at(NOW + 15_001));
}

#[test]
fn test_millis_until_expiry_saturates_for_extreme_expiry() {
    let record = PinRecord::from_parts("482913", i64::MIN, 0, 5);
    assert_eq!(record.millis_until_expiry_at(NOW), 0);

    let record = PinRecord::from_parts("482913", i64::MAX, 0, 5);
    assert_eq!(record.millis_until_expiry_at(-NOW), i64::MAX);
}

#[test]
fn test_expires_at_matches_millis() {
    let record = PinRecord::new_at("482913", 10.0, NOW);
    let expires_at = record.expires_at().unwrap();
    assert_eq!(expires_at.timestamp_millis(), record.expiry_time());
}

#[test]
fn test_increment_returns_new_value() {
    let original = PinRecord::new_at("482913", 10.0, NOW);
    let incremented = original.with_incremented_attempts();

    assert_eq!(original.attempts(), 0);
    assert_eq!(incremented.attempts(), 1);
    assert_eq!(incremented.pin(), original.pin());
    assert_eq!(incremented.expiry_time(), original.expiry_time());
    assert_eq!(incremented.max_attempts(), original.max_attempts());
}

#[test]
fn test_increment_is_unbounded() {
    let record = PinRecord::from_parts("482913", NOW, MAX_ATTEMPTS, MAX_ATTEMPTS);
    let incremented = record.with_incremented_attempts();

    assert_eq!(incremented.attempts(), MAX_ATTEMPTS + 1);
    assert!(incremented.is_locked());
    assert_eq!(incremented.remaining_attempts(), 0);
}

#[test]
fn test_capped_increment_stops_at_ceiling() {
    let mut record = PinRecord::new_at("482913", 10.0, NOW);
    for _ in 0..MAX_ATTEMPTS + 3 {
        record = record.with_capped_attempts();
    }
    assert_eq!(record.attempts(), MAX_ATTEMPTS);
}

#[test]
fn test_with_max_attempts() {
    let record = PinRecord::new_at("482913", 10.0, NOW).with_max_attempts(3);
    assert_eq!(record.max_attempts(), 3);
    assert_eq!(record.remaining_attempts(), 3);
}

#[test]
fn test_json_uses_camel_case() {
    let record = PinRecord::from_parts("482913", NOW, 2, 5);
    let value = serde_json::to_value(&record).unwrap();

    assert_eq!(value["pin"], "482913");
    assert_eq!(value["expiryTime"], NOW);
    assert_eq!(value["attempts"], 2);
    assert_eq!(value["maxAttempts"], 5);

    let parsed: PinRecord = serde_json::from_value(value).unwrap();
    assert_eq!(parsed, record);
}
