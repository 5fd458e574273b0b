//! Daily Read Server
//!
//! Binds the HTTP layer over the deterministic play generator and the
//! SQLite attempt store.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use daily_read::core::seed::DAILY_ZONE;
use daily_read::server::config::ServerConfig;
use daily_read::{create_router, AppState, SqliteStore, VERSION};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let config = ServerConfig::from_env();

    info!("Daily Read Server v{}", VERSION);
    info!("Database: {}", config.db_path);
    info!("Daily rollover zone: {}", DAILY_ZONE);
    if config.admin_emails.is_empty() {
        info!("No admin emails configured; override endpoint is locked");
    } else {
        info!("{} admin email(s) configured", config.admin_emails.len());
    }

    let store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("failed to open database at {}", config.db_path))?;

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(Arc::new(store), config);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!("Listening on {}", bind_addr);

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
