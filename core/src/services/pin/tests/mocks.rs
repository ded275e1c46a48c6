//! Repository doubles for service tests

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::entities::pin_record::PinRecord;
use crate::errors::DomainError;
use crate::repositories::pin::{MemoryPinRecordRepository, PinRecordRepository};

/// Repository whose every call fails
pub struct FailingRepository;

#[async_trait]
impl PinRecordRepository for FailingRepository {
    async fn find(&self, _identity: &str) -> Result<Option<PinRecord>, DomainError> {
        Err(DomainError::storage("store unavailable"))
    }

    async fn save(&self, _identity: &str, _record: &PinRecord) -> Result<(), DomainError> {
        Err(DomainError::storage("store unavailable"))
    }

    async fn remove(&self, _identity: &str) -> Result<bool, DomainError> {
        Err(DomainError::storage("store unavailable"))
    }
}

/// Memory repository that pauses between reading and returning,
/// widening the window for interleaved read-modify-write cycles
#[derive(Default)]
pub struct SlowRepository {
    pub inner: MemoryPinRecordRepository,
}

#[async_trait]
impl PinRecordRepository for SlowRepository {
    async fn find(&self, identity: &str) -> Result<Option<PinRecord>, DomainError> {
        let record = self.inner.find(identity).await?;
        tokio::time::sleep(Duration::from_millis(5)).await;
        Ok(record)
    }

    async fn save(&self, identity: &str, record: &PinRecord) -> Result<(), DomainError> {
        self.inner.save(identity, record).await
    }

    async fn remove(&self, identity: &str) -> Result<bool, DomainError> {
        self.inner.remove(identity).await
    }
}
