//! Configured PIN policy

use chrono::Utc;

use pv_shared::config::PinPolicyConfig;

use crate::domain::entities::pin_record::PinRecord;
use crate::domain::value_objects::pin_validation::PinValidation;
use crate::errors::{DomainError, DomainResult};

use super::engine;

/// The policy engine bound to a `PinPolicyConfig`
///
/// `PinPolicy::default()` behaves exactly like the free functions in
/// `engine`: 10-minute expiry, 5 attempts, uncapped counter, thread RNG.
#[derive(Debug, Clone, Default)]
pub struct PinPolicy {
    config: PinPolicyConfig,
}

impl PinPolicy {
    /// Create a policy, rejecting configurations it cannot enforce
    pub fn new(config: PinPolicyConfig) -> DomainResult<Self> {
        config.validate().map_err(|e| DomainError::Validation {
            message: e.to_string(),
        })?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PinPolicyConfig {
        &self.config
    }

    /// Generate a PIN with the configured random source
    pub fn generate_pin(&self) -> String {
        if self.config.secure_rng {
            engine::generate_secure_pin()
        } else {
            engine::generate_pin()
        }
    }

    /// Create a record for `pin` with the configured expiry and ceiling
    pub fn create_record(&self, pin: impl Into<String>) -> PinRecord {
        self.create_record_at(pin, Utc::now().timestamp_millis())
    }

    pub fn create_record_at(&self, pin: impl Into<String>, now_ms: i64) -> PinRecord {
        PinRecord::new_at(pin, self.config.expiry_minutes, now_ms)
            .with_max_attempts(self.config.max_attempts)
    }

    /// Generate a PIN and wrap it in a fresh record
    pub fn issue(&self) -> PinRecord {
        self.create_record(self.generate_pin())
    }

    /// Validate a submission; the ceiling comes from the record itself
    pub fn validate(&self, stored_record: Option<&PinRecord>, input_pin: &str) -> PinValidation {
        engine::validate_pin(stored_record, input_pin)
    }

    pub fn validate_at(
        &self,
        stored_record: Option<&PinRecord>,
        input_pin: &str,
        now_ms: i64,
    ) -> PinValidation {
        engine::validate_pin_at(stored_record, input_pin, now_ms)
    }

    /// Record a failed attempt, capped at the ceiling when configured
    pub fn increment_attempts(&self, record: &PinRecord) -> PinRecord {
        if self.config.cap_attempts_at_ceiling {
            record.with_capped_attempts()
        } else {
            engine::increment_pin_attempts(record)
        }
    }
}
