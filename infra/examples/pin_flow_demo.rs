//! Walk through issuing and verifying a PIN
//!
//! Run with: cargo run -p pv_infra --example pin_flow_demo
//! Pass `--redis` to store records in Redis (PV_CACHE__URL, default redis://localhost:6379).

use std::sync::Arc;

use anyhow::Context;
use pv_core::{MemoryPinRecordRepository, PinPolicy, PinRecordRepository, PinVerificationService};
use pv_infra::RedisPinRecordRepository;
use pv_shared::{init_tracing, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(&config.logging).context("initializing logging")?;

    let repository: Arc<dyn PinRecordRepository> = if std::env::args().any(|a| a == "--redis") {
        Arc::new(
            RedisPinRecordRepository::connect(&config.cache)
                .await
                .context("connecting to Redis")?,
        )
    } else {
        Arc::new(MemoryPinRecordRepository::new())
    };

    let policy = PinPolicy::new(config.pin.clone())?;
    let service = PinVerificationService::new(repository, policy);
    let identity = "demo@example.com";

    let record = service.issue_pin(identity).await?;
    println!("Issued PIN {} (expires at {:?})", record.pin(), record.expires_at());

    let wrong = if record.pin() == "123456" { "654321" } else { "123456" };
    let miss = service.verify_pin(identity, wrong).await?;
    println!("Wrong PIN   -> {}", serde_json::to_string(&miss)?);

    let hit = service.verify_pin(identity, record.pin()).await?;
    println!("Correct PIN -> {}", serde_json::to_string(&hit)?);

    let replay = service.verify_pin(identity, record.pin()).await?;
    println!("Replay      -> {}", serde_json::to_string(&replay)?);

    Ok(())
}
