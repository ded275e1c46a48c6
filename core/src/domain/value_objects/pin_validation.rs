//! Result of checking a submitted PIN against a stored record.

use serde::Serialize;

pub const MESSAGE_NO_RECORD: &str = "No PIN record found";
pub const MESSAGE_EXPIRED: &str = "PIN has expired. Please register again.";
pub const MESSAGE_LOCKED: &str = "Maximum PIN attempts exceeded. Please register again.";
pub const MESSAGE_INCORRECT: &str = "PIN is incorrect";
pub const MESSAGE_VALID: &str = "PIN is valid";

/// Typed outcome of a PIN check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinOutcome {
    /// No record exists for the caller
    NoRecord,
    /// The record's expiry has passed
    Expired,
    /// The attempt ceiling has been reached
    Locked,
    /// Wrong PIN; the record survives with the given attempts left after this one
    Incorrect { remaining_attempts: u32 },
    /// PIN matches
    Valid,
}

impl PinOutcome {
    /// User-facing message for this outcome
    pub fn message(&self) -> &'static str {
        match self {
            PinOutcome::NoRecord => MESSAGE_NO_RECORD,
            PinOutcome::Expired => MESSAGE_EXPIRED,
            PinOutcome::Locked => MESSAGE_LOCKED,
            PinOutcome::Incorrect { .. } => MESSAGE_INCORRECT,
            PinOutcome::Valid => MESSAGE_VALID,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, PinOutcome::Valid)
    }

    /// Outcomes after which the record should be discarded
    pub fn is_terminal(&self) -> bool {
        matches!(self, PinOutcome::Valid | PinOutcome::Expired | PinOutcome::Locked)
    }

    /// Short identifier used in log events
    pub fn as_str(&self) -> &'static str {
        match self {
            PinOutcome::NoRecord => "no_record",
            PinOutcome::Expired => "expired",
            PinOutcome::Locked => "locked",
            PinOutcome::Incorrect { .. } => "incorrect",
            PinOutcome::Valid => "valid",
        }
    }
}

/// Result descriptor `{ valid, message, remainingAttempts? }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinValidation {
    pub valid: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_attempts: Option<u32>,
    #[serde(skip)]
    outcome: PinOutcome,
}

impl PinValidation {
    pub fn outcome(&self) -> PinOutcome {
        self.outcome
    }
}

impl From<PinOutcome> for PinValidation {
    fn from(outcome: PinOutcome) -> Self {
        let remaining_attempts = match outcome {
            PinOutcome::Incorrect { remaining_attempts } => Some(remaining_attempts),
            _ => None,
        };

        Self {
            valid: outcome.is_valid(),
            message: outcome.message().to_string(),
            remaining_attempts,
            outcome,
        }
    }
}
