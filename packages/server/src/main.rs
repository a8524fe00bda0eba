use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use common::DiskMediaStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::config::AppConfig;
use server::database::init_db;
use server::services::duration::{DurationCache, NoProbe};
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("loading configuration")?;

    let db = init_db(&config.database.url)
        .await
        .context("connecting to database")?;

    let media = DiskMediaStore::new(
        config.storage.upload_dir.clone(),
        config.storage.max_upload_size,
    )
    .await
    .context("preparing upload directory")?;
    let durations = DurationCache::new(config.storage.upload_dir.clone(), Box::new(NoProbe));

    let addr = SocketAddr::new(
        config.server.host.parse().context("parsing server.host")?,
        config.server.port,
    );

    let state = AppState {
        db,
        config,
        media: Arc::new(media),
        durations: Arc::new(durations),
    };
    let app = server::build_router(state);

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
