//! Redis-backed caching for PIN records
//!
//! Records are stored as JSON under `{key_prefix}:{identity}` with a key
//! TTL derived from the record's expiry.

pub mod pin_store;
pub mod redis_client;

pub use pin_store::RedisPinRecordRepository;
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use pv_shared::config::CacheConfig;
