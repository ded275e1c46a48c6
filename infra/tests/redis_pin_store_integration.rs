//! Integration tests for the Redis PIN record repository
//!
//! These tests require a running Redis server (REDIS_URL, default redis://localhost:6379).
//! Run with: cargo test -p pv_infra --test redis_pin_store_integration -- --ignored

use std::sync::Arc;

use pv_core::{PinOutcome, PinPolicy, PinRecord, PinRecordRepository, PinVerificationService};
use pv_infra::cache::{CacheConfig, RedisPinRecordRepository, pin_store::EXPIRED_RECORD_GRACE_SECONDS};

async fn connect(prefix: &str) -> RedisPinRecordRepository {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let config = CacheConfig::new(url).with_key_prefix(format!("test:{}", prefix));
    RedisPinRecordRepository::connect(&config)
        .await
        .expect("Redis should be reachable")
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_health_check() {
    let repo = connect("health").await;
    assert!(repo.client().health_check().await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_save_find_remove() {
    let repo = connect("crud").await;
    let identity = "alice@example.com";
    let record = PinRecord::new("482913", 10.0);

    repo.save(identity, &record).await.unwrap();
    assert_eq!(repo.find(identity).await.unwrap(), Some(record));

    assert!(repo.remove(identity).await.unwrap());
    assert_eq!(repo.find(identity).await.unwrap(), None);
    assert!(!repo.remove(identity).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_key_ttl_follows_expiry() {
    let repo = connect("ttl").await;
    let identity = "bob@example.com";
    repo.save(identity, &PinRecord::new("482913", 1.0)).await.unwrap();

    let ttl = repo.client().ttl_millis(&repo.record_key(identity)).await.unwrap();
    let upper = (60 + EXPIRED_RECORD_GRACE_SECONDS as i64) * 1000;
    assert!(ttl > upper - 5_000 && ttl <= upper);

    repo.remove(identity).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_expired_record_reports_expired() {
    let repo = connect("expired").await;
    let identity = "carol@example.com";
    let expired = PinRecord::from_parts("482913", 0, 0, 5);
    repo.save(identity, &expired).await.unwrap();

    let service = PinVerificationService::new(Arc::new(repo.clone()), PinPolicy::default());
    let result = service.verify_pin(identity, "482913").await.unwrap();

    assert_eq!(result.outcome(), PinOutcome::Expired);
    assert_eq!(repo.find(identity).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_service_flow_on_redis() {
    let repo = Arc::new(connect("flow").await);
    let service = PinVerificationService::new(repo.clone(), PinPolicy::default());
    let identity = "dave@example.com";

    let issued = service.issue_pin(identity).await.unwrap();
    let wrong = if issued.pin() == "123456" { "654321" } else { "123456" };

    let miss = service.verify_pin(identity, wrong).await.unwrap();
    assert_eq!(miss.remaining_attempts, Some(4));
    assert_eq!(repo.find(identity).await.unwrap().unwrap().attempts(), 1);

    let hit = service.verify_pin(identity, issued.pin()).await.unwrap();
    assert!(hit.valid);
    assert_eq!(repo.find(identity).await.unwrap(), None);
}
