use std::sync::Arc;

use anyhow::{Context, Result};
use recordstore::FileRecordStore;
use tracing::{info, warn};

use record_server::config::AppConfig;
use record_server::{router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;

    if !cfg.csv_path.is_file() {
        // appends will answer "read failure" until the file shows up
        warn!(path = %cfg.csv_path.display(), "backing csv file not found");
    }

    let state = Arc::new(AppState::new(FileRecordStore::new(cfg.csv_path.clone())));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", cfg.bind_addr))?;
    info!(addr = %cfg.bind_addr, path = %cfg.csv_path.display(), "record-server listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
