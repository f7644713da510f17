//! Invoice dashboard server
//!
//! Serves PostgreSQL when built with the `postgres` feature and a database
//! url is configured; otherwise an in-memory store with sample data.

use anyhow::Result;
use dashboard::prelude::*;
use dashboard::storage::seed;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "dashboard=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = DashboardConfig::load()?;
    let store = open_store(&config).await?;

    ServerBuilder::new()
        .with_shared_store(store)
        .with_config(config)
        .serve()
        .await
}

#[cfg(feature = "postgres")]
async fn open_store(config: &DashboardConfig) -> Result<Arc<dyn InvoiceService>> {
    use dashboard::storage::postgres;

    match config.database_url.as_deref() {
        Some(url) => {
            let pool = postgres::connect(config, url).await?;
            postgres::migrate(&pool).await?;
            Ok(Arc::new(PostgresInvoiceService::new(pool)))
        }
        None => Ok(in_memory_store()),
    }
}

#[cfg(not(feature = "postgres"))]
async fn open_store(config: &DashboardConfig) -> Result<Arc<dyn InvoiceService>> {
    if config.database_url.is_some() {
        tracing::warn!("database_url is set but the postgres feature is disabled");
    }
    Ok(in_memory_store())
}

fn in_memory_store() -> Arc<dyn InvoiceService> {
    tracing::info!("using in-memory store with sample data");
    Arc::new(seed::sample_store())
}
