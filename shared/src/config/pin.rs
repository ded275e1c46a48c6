//! PIN policy configuration

use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;

/// Default lifetime of an issued PIN in minutes
pub const DEFAULT_PIN_EXPIRY_MINUTES: f64 = 10.0;

/// Longest PIN lifetime the policy accepts (one day)
pub const MAX_PIN_EXPIRY_MINUTES: f64 = 24.0 * 60.0;

/// Default ceiling on failed PIN submissions
pub const DEFAULT_PIN_MAX_ATTEMPTS: u32 = 5;

/// Tunables for PIN issuance and validation
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PinPolicyConfig {
    /// Minutes until an issued PIN expires, fractions allowed
    pub expiry_minutes: f64,

    /// Failed submissions allowed before the record locks
    pub max_attempts: u32,

    /// Stop incrementing the attempt counter once it reaches `max_attempts`
    pub cap_attempts_at_ceiling: bool,

    /// Draw PINs from the OS CSPRNG instead of the thread-local RNG
    pub secure_rng: bool,
}

impl Default for PinPolicyConfig {
    fn default() -> Self {
        Self {
            expiry_minutes: DEFAULT_PIN_EXPIRY_MINUTES,
            max_attempts: DEFAULT_PIN_MAX_ATTEMPTS,
            cap_attempts_at_ceiling: false,
            secure_rng: false,
        }
    }
}

impl PinPolicyConfig {
    /// Hardened settings: capped counter and CSPRNG-backed PINs
    pub fn hardened() -> Self {
        Self {
            cap_attempts_at_ceiling: true,
            secure_rng: true,
            ..Default::default()
        }
    }

    /// Set the PIN lifetime in minutes
    pub fn with_expiry_minutes(mut self, minutes: f64) -> Self {
        self.expiry_minutes = minutes;
        self
    }

    /// Set the attempt ceiling
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Reject values the policy cannot work with
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.expiry_minutes.is_nan() || self.expiry_minutes <= 0.0 {
            return Err(ConfigurationError::invalid(
                "pin.expiry_minutes",
                format!("must be positive, got {}", self.expiry_minutes),
            ));
        }
        if self.expiry_minutes > MAX_PIN_EXPIRY_MINUTES {
            return Err(ConfigurationError::invalid(
                "pin.expiry_minutes",
                format!(
                    "must be at most {}, got {}",
                    MAX_PIN_EXPIRY_MINUTES, self.expiry_minutes
                ),
            ));
        }
        if self.max_attempts == 0 {
            return Err(ConfigurationError::invalid(
                "pin.max_attempts",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
