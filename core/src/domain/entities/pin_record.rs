//! One-time PIN record entity.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
/// Smallest PIN value that can be generated
pub const PIN_MIN: u32 = 100_000;

/// Largest PIN value that can be generated
pub const PIN_MAX: u32 = 999_999;

/// Failed submissions allowed before a record locks
pub const MAX_ATTEMPTS: u32 = 5;

/// Default PIN lifetime (10 minutes)
pub const DEFAULT_EXPIRY_MINUTES: f64 = 10.0;

pub const MILLIS_PER_MINUTE: i64 = 60_000;

/// Converts a lifetime in minutes to milliseconds, rounded to the nearest ms
///
/// Fractional minutes are allowed (`0.5` is 30 000 ms). Out-of-range values
/// saturate and NaN becomes zero.
pub fn minutes_to_millis(minutes: f64) -> i64 {
    (minutes * MILLIS_PER_MINUTE as f64).round() as i64
}

/// One outstanding PIN challenge
///
/// Records are values: nothing mutates a record in place, operations that
/// change the attempt counter return a new record. The expiry is fixed at
/// creation. The JSON form uses camelCase keys (`expiryTime`, `maxAttempts`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinRecord {
    pin: String,
    expiry_time: i64,
    attempts: u32,
    max_attempts: u32,
}

impl PinRecord {
    /// Creates a record expiring `expiry_minutes` from now with the default ceiling
    ///
    /// The PIN is stored as given; its format is not checked.
    pub fn new(pin: impl Into<String>, expiry_minutes: f64) -> Self {
        Self::new_at(pin, expiry_minutes, Utc::now().timestamp_millis())
    }

    /// Creates a record relative to an explicit clock value (ms since epoch)
    pub fn new_at(pin: impl Into<String>, expiry_minutes: f64, now_ms: i64) -> Self {
        Self {
            pin: pin.into(),
            expiry_time: now_ms.saturating_add(minutes_to_millis(expiry_minutes)),
            attempts: 0,
            max_attempts: MAX_ATTEMPTS,
        }
    }

    /// Rebuilds a record from stored fields
    pub fn from_parts(
        pin: impl Into<String>,
        expiry_time: i64,
        attempts: u32,
        max_attempts: u32,
    ) -> Self {
        Self {
            pin: pin.into(),
            expiry_time,
            attempts,
            max_attempts,
        }
    }

    /// Returns the same record with a different attempt ceiling
    pub fn with_max_attempts(self, max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..self
        }
    }

    pub fn pin(&self) -> &str {
        &self.pin
    }

    /// Expiry as milliseconds since the Unix epoch
    pub fn expiry_time(&self) -> i64 {
        self.expiry_time
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Expiry as a UTC timestamp, `None` if outside chrono's range
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.expiry_time).single()
    }

    /// A record expires strictly after its expiry instant
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms > self.expiry_time
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp_millis())
    }

    /// Checks if the attempt ceiling has been reached
    pub fn is_locked(&self) -> bool {
        self.attempts >= self.max_attempts
    }

    /// Failed submissions left before the record locks
    pub fn remaining_attempts(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts)
    }

    /// Milliseconds until expiry at `now_ms`, zero once expired
    pub fn millis_until_expiry_at(&self, now_ms: i64) -> i64 {
        self.expiry_time.saturating_sub(now_ms).max(0)
    }

    /// Returns a copy with one more failed attempt recorded
    ///
    /// Unbounded: the counter keeps growing past the ceiling.
    pub fn with_incremented_attempts(&self) -> Self {
        Self {
            attempts: self.attempts.saturating_add(1),
            ..self.clone()
        }
    }

    /// Like `with_incremented_attempts`, but never past `max_attempts`
    pub fn with_capped_attempts(&self) -> Self {
        let attempts = if self.attempts >= self.max_attempts {
            self.attempts
        } else {
            self.attempts + 1
        };
        Self {
            attempts,
            ..self.clone()
        }
    }
}
