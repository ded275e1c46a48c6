//! Redis implementation of the PIN record repository
//!
//! Each identity maps to one key holding the record as JSON:
//! `{key_prefix}:{identity}` → `{"pin":"482913","expiryTime":...,"attempts":0,"maxAttempts":5}`
//!
//! The key TTL outlives the record's expiry by a grace period so that a
//! late submission still reports "expired" rather than "no record".

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, warn};

use pv_core::domain::entities::PinRecord;
use pv_core::errors::DomainError;
use pv_core::repositories::PinRecordRepository;
use pv_shared::config::CacheConfig;
use pv_shared::identity::mask_identity;

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// Seconds an expired record stays readable before Redis evicts it
pub const EXPIRED_RECORD_GRACE_SECONDS: u64 = 300;

/// PIN record repository on Redis
///
/// Writes are last-writer-wins. Concurrent verifiers in different
/// processes must coordinate per identity themselves.
#[derive(Clone)]
pub struct RedisPinRecordRepository {
    client: RedisClient,
    key_prefix: String,
}

impl RedisPinRecordRepository {
    pub fn new(client: RedisClient, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
        }
    }

    /// Connect to Redis and build a repository from cache settings
    pub async fn connect(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        let client = RedisClient::new(config).await?;
        Ok(Self::new(client, config.key_prefix.clone()))
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }

    /// Redis key for an identity
    pub fn record_key(&self, identity: &str) -> String {
        format!("{}:{}", self.key_prefix, identity)
    }

    /// Key TTL for a record written at `now_ms`: time to expiry rounded up
    /// to whole seconds, plus the grace period
    pub fn ttl_seconds(record: &PinRecord, now_ms: i64) -> u64 {
        let remaining_ms = record.millis_until_expiry_at(now_ms) as u64;
        remaining_ms.div_ceil(1000) + EXPIRED_RECORD_GRACE_SECONDS
    }
}

#[async_trait]
impl PinRecordRepository for RedisPinRecordRepository {
    async fn find(&self, identity: &str) -> Result<Option<PinRecord>, DomainError> {
        let key = self.record_key(identity);

        let Some(json) = self.client.get(&key).await? else {
            debug!(identity = %mask_identity(identity), "No PIN record in Redis");
            return Ok(None);
        };

        let record: PinRecord = serde_json::from_str(&json).map_err(|e| {
            warn!(
                identity = %mask_identity(identity),
                error = %e,
                "Stored PIN record could not be decoded"
            );
            InfrastructureError::Serialization(e)
        })?;

        Ok(Some(record))
    }

    async fn save(&self, identity: &str, record: &PinRecord) -> Result<(), DomainError> {
        let key = self.record_key(identity);
        let json = serde_json::to_string(record).map_err(InfrastructureError::Serialization)?;
        let ttl = Self::ttl_seconds(record, Utc::now().timestamp_millis());

        self.client.set_with_expiry(&key, &json, ttl).await?;

        debug!(
            identity = %mask_identity(identity),
            attempts = record.attempts(),
            ttl_seconds = ttl,
            "Stored PIN record in Redis"
        );
        Ok(())
    }

    async fn remove(&self, identity: &str) -> Result<bool, DomainError> {
        let key = self.record_key(identity);
        Ok(self.client.delete(&key).await?)
    }
}
