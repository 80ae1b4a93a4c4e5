//! Mini Cache - demonstration binary
//!
//! Walks through the cache's public surface, logging what it observes.

use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_cache::{Cache, Config, Json};

/// Example record stored as structured data.
#[derive(Debug, Serialize, Deserialize)]
struct User {
    id: u32,
    name: String,
    email: String,
}

/// Runs the walkthrough.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Exercise text, expiring, structured and raw values
/// 4. Stop the background sweeper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!("Configuration loaded: cleanup_interval={:?}", config.cleanup_interval);

    let cache = Cache::from_config(&config);

    // Plain text
    cache.set("greeting", "Hello, world!")?;
    if let Some(greeting) = cache.get_text("greeting") {
        info!("Greeting: {}", greeting);
    }

    // Expiring entry
    cache.set_with_expiration("temporary", "I'll be gone soon", Duration::from_secs(5))?;
    info!("'temporary' expires in {:?}", cache.ttl("temporary")?);

    tokio::time::sleep(Duration::from_secs(2)).await;
    info!("'temporary' now expires in {:?}", cache.ttl("temporary")?);

    // Structured value
    let user = User {
        id: 1,
        name: "John Doe".to_string(),
        email: "john@example.com".to_string(),
    };
    cache.set("user:1", &Json(&user))?;

    let retrieved: Option<Json<User>> = cache
        .get("user:1")
        .context("stored user could not be decoded")?;
    if let Some(Json(user)) = retrieved {
        info!("Retrieved user: {:?}", user);
    }

    // Raw bytes
    cache.set("raw", &[0x48u8, 0x65, 0x6c, 0x6c, 0x6f][..])?;
    if let Some(data) = cache.get_raw("raw") {
        info!("Raw data: {:?}", data);
        info!("As string: {}", String::from_utf8_lossy(&data));
    }

    if cache.exists("greeting") {
        info!("'greeting' exists in cache");
    }

    cache.delete("greeting");
    if !cache.exists("greeting") {
        info!("'greeting' was successfully deleted");
    }

    info!("Cache contains {} items", cache.count());

    cache.flush();
    info!("After flush, cache contains {} items", cache.count());

    cache.stop_sweeper();
    Ok(())
}
