//! In-process PIN record repository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::pin_record::PinRecord;
use crate::errors::DomainError;

use super::r#trait::PinRecordRepository;

/// Repository backed by a `HashMap`, for single-process use and tests
///
/// Expired records are not swept; they stay until removed or overwritten
/// and validation reports them as expired.
#[derive(Clone, Default)]
pub struct MemoryPinRecordRepository {
    records: Arc<RwLock<HashMap<String, PinRecord>>>,
}

impl MemoryPinRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl PinRecordRepository for MemoryPinRecordRepository {
    async fn find(&self, identity: &str) -> Result<Option<PinRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(identity).cloned())
    }

    async fn save(&self, identity: &str, record: &PinRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records.insert(identity.to_string(), record.clone());
        Ok(())
    }

    async fn remove(&self, identity: &str) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        Ok(records.remove(identity).is_some())
    }
}
