//! PIN verification service

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Mutex as AsyncMutex;

use pv_shared::identity::{mask_identity, normalize_identity};
use pv_shared::pin::is_well_formed_pin;

use crate::domain::entities::pin_record::PinRecord;
use crate::domain::value_objects::pin_validation::{PinOutcome, PinValidation};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::pin::PinRecordRepository;

use super::policy::PinPolicy;

type IdentityLock = Arc<AsyncMutex<()>>;

/// Drives PIN records through issue and verification against a repository
///
/// Every operation for one identity runs under that identity's lock, so the
/// find-validate-save sequence of a verification cannot interleave with
/// another verification or an issue for the same identity. Identities are
/// trimmed and lowercased before use.
pub struct PinVerificationService<R: PinRecordRepository + ?Sized> {
    /// Record storage
    repository: Arc<R>,
    /// Policy used to generate, validate and increment records
    policy: PinPolicy,
    /// Per-identity locks, pruned when idle
    locks: Mutex<HashMap<String, IdentityLock>>,
}

impl<R: PinRecordRepository + ?Sized> PinVerificationService<R> {
    /// Create a new verification service
    pub fn new(repository: Arc<R>, policy: PinPolicy) -> Self {
        Self {
            repository,
            policy,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> &PinPolicy {
        &self.policy
    }

    /// Start a verification flow: generate a PIN and store a fresh record
    ///
    /// Any previous record for the identity is replaced, which also resets
    /// its attempt counter. The returned record carries the PIN so the
    /// caller can deliver it.
    pub async fn issue_pin(&self, identity: &str) -> DomainResult<PinRecord> {
        let pin = self.policy.generate_pin();
        self.store_new_record(identity, pin).await
    }

    /// Start a verification flow with a caller-chosen PIN
    ///
    /// Unlike `create_pin_record`, the PIN must have the generated shape
    /// (six digits, no leading zero).
    pub async fn issue_pin_with(&self, identity: &str, pin: &str) -> DomainResult<PinRecord> {
        if !is_well_formed_pin(pin) {
            return Err(DomainError::Validation {
                message: "PIN must be 6 digits without a leading zero".to_string(),
            });
        }
        self.store_new_record(identity, pin.to_string()).await
    }

    /// Check a submitted PIN and apply the outcome to the stored record
    ///
    /// - wrong PIN: the record is saved with one more attempt
    /// - valid, expired or locked: the record is removed
    /// - no record: nothing is written
    pub async fn verify_pin(&self, identity: &str, input_pin: &str) -> DomainResult<PinValidation> {
        let key = Self::identity_key(identity)?;
        let masked = mask_identity(&key);

        let lock = self.lock_for(&key);
        let result = {
            let _guard = lock.lock().await;
            self.verify_locked(&key, &masked, input_pin).await
        };
        self.release_lock(&key, lock);

        result
    }

    /// Discard any outstanding record for the identity
    pub async fn revoke_pin(&self, identity: &str) -> DomainResult<bool> {
        let key = Self::identity_key(identity)?;

        let lock = self.lock_for(&key);
        let result = {
            let _guard = lock.lock().await;
            self.repository.remove(&key).await
        };
        self.release_lock(&key, lock);

        if let Ok(true) = result {
            tracing::info!(
                identity = %mask_identity(&key),
                event = "pin_revoked",
                "Revoked outstanding PIN"
            );
        }
        result
    }

    /// Current stored record for the identity, if any
    pub async fn current_record(&self, identity: &str) -> DomainResult<Option<PinRecord>> {
        let key = Self::identity_key(identity)?;
        self.repository.find(&key).await
    }

    /// Number of identities with a lock entry (held or awaited)
    pub fn active_locks(&self) -> usize {
        self.lock_table().len()
    }

    async fn store_new_record(&self, identity: &str, pin: String) -> DomainResult<PinRecord> {
        let key = Self::identity_key(identity)?;
        let record = self.policy.create_record(pin);

        let lock = self.lock_for(&key);
        let result = {
            let _guard = lock.lock().await;
            self.repository.save(&key, &record).await
        };
        self.release_lock(&key, lock);

        match result {
            Ok(()) => {
                tracing::info!(
                    identity = %mask_identity(&key),
                    event = "pin_issued",
                    expiry_time = record.expiry_time(),
                    max_attempts = record.max_attempts(),
                    "Issued new PIN"
                );
                Ok(record)
            }
            Err(e) => {
                tracing::error!(
                    identity = %mask_identity(&key),
                    error = %e,
                    event = "pin_storage_failed",
                    "Failed to store PIN record"
                );
                Err(e)
            }
        }
    }

    async fn verify_locked(
        &self,
        key: &str,
        masked: &str,
        input_pin: &str,
    ) -> DomainResult<PinValidation> {
        let stored = self.repository.find(key).await?;
        let validation = self.policy.validate(stored.as_ref(), input_pin);

        match (validation.outcome(), stored) {
            (PinOutcome::Incorrect { remaining_attempts }, Some(record)) => {
                let updated = self.policy.increment_attempts(&record);
                self.repository.save(key, &updated).await?;

                tracing::warn!(
                    identity = %masked,
                    event = "pin_incorrect",
                    attempts = updated.attempts(),
                    remaining_attempts = remaining_attempts,
                    "PIN verification failed"
                );
            }
            (outcome, Some(_)) if outcome.is_terminal() => {
                self.repository.remove(key).await?;

                if outcome.is_valid() {
                    tracing::info!(
                        identity = %masked,
                        event = "pin_verified",
                        "PIN verified successfully"
                    );
                } else {
                    tracing::warn!(
                        identity = %masked,
                        event = "pin_rejected",
                        outcome = outcome.as_str(),
                        "PIN record discarded"
                    );
                }
            }
            (outcome, _) => {
                tracing::debug!(
                    identity = %masked,
                    event = "pin_rejected",
                    outcome = outcome.as_str(),
                    "PIN verification without an outstanding record"
                );
            }
        }

        Ok(validation)
    }

    fn identity_key(identity: &str) -> DomainResult<String> {
        let key = normalize_identity(identity);
        if key.is_empty() {
            return Err(DomainError::Validation {
                message: "Identity must not be empty".to_string(),
            });
        }
        Ok(key)
    }

    fn lock_table(&self) -> std::sync::MutexGuard<'_, HashMap<String, IdentityLock>> {
        self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_for(&self, key: &str) -> IdentityLock {
        self.lock_table()
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    // Drops the table entry once only the table and this caller hold it.
    fn release_lock(&self, key: &str, lock: IdentityLock) {
        let mut table = self.lock_table();
        if Arc::strong_count(&lock) == 2 {
            table.remove(key);
        }
    }
}
