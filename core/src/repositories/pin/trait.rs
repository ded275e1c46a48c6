//! Repository trait for PIN record persistence.

use async_trait::async_trait;

use crate::domain::entities::pin_record::PinRecord;
use crate::errors::DomainError;

/// Store contract for PIN records keyed by an opaque identity
///
/// The key is whatever the surrounding system uses (email address, user
/// id). Implementations only store and return values; validation and
/// attempt counting stay in the policy engine.
///
/// # Concurrency
/// A verification is a read-validate-increment-write sequence. Two
/// interleaved sequences for one identity can both read `attempts = k` and
/// both write `k + 1`, handing out a free attempt. `PinVerificationService`
/// serialises sequences within one process; deployments with several
/// processes sharing a store need a single writer per identity or a
/// compare-and-swap on the store side.
#[async_trait]
pub trait PinRecordRepository: Send + Sync {
    /// Find the current record for an identity
    ///
    /// # Returns
    /// * `Ok(Some(PinRecord))` - Record found
    /// * `Ok(None)` - No record stored for this identity
    /// * `Err(DomainError)` - Storage failure
    async fn find(&self, identity: &str) -> Result<Option<PinRecord>, DomainError>;

    /// Store a record, replacing any previous record for the identity
    async fn save(&self, identity: &str, record: &PinRecord) -> Result<(), DomainError>;

    /// Remove the record for an identity
    ///
    /// # Returns
    /// * `Ok(true)` - A record was removed
    /// * `Ok(false)` - Nothing was stored
    async fn remove(&self, identity: &str) -> Result<bool, DomainError>;
}
