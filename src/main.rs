use anyhow::Context;
use tracing_subscriber::EnvFilter;

use doc_catalog::config::AppConfig;
use doc_catalog::db::{connection, migrations};
use doc_catalog::routes;
use doc_catalog::services::storage::StorageService;
use doc_catalog::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded (env: {})", std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into()));

    let db_pool = connection::create_pool(&config.database)
        .await
        .context("Failed to create database pool")?;

    migrations::run_all(&db_pool)
        .await
        .context("Failed to run migrations")?;

    let storage = StorageService::new(&config.storage)
        .await
        .context("Failed to prepare upload directory")?;
    tracing::info!(
        "Serving uploads from {} at {}",
        storage.upload_dir().display(),
        storage.public_path()
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = routes::router(AppState::new(config, db_pool, storage));

    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
