//! ServerBuilder for fluent API to build the dashboard HTTP server

use super::handlers::AppState;
use super::pages::Pages;
use super::router::{build_invoice_routes, health_routes};
use crate::config::DashboardConfig;
use crate::core::actions::ActionContext;
use crate::core::cache::RouteCache;
use crate::core::clock::{Clock, SystemClock};
use crate::core::service::InvoiceService;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Builder for the dashboard server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryInvoiceService::new())
///     .with_config(DashboardConfig::default())
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn InvoiceService>>,
    clock: Arc<dyn Clock>,
    config: DashboardConfig,
    cache: RouteCache,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            clock: Arc::new(SystemClock),
            config: DashboardConfig::default(),
            cache: RouteCache::new(),
        }
    }

    /// Set the invoice store (required)
    pub fn with_store(mut self, store: impl InvoiceService + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set an already shared invoice store
    pub fn with_shared_store(mut self, store: Arc<dyn InvoiceService>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the clock used to stamp invoice dates
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_config(mut self, config: DashboardConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an existing route cache, e.g. to inspect it from tests
    pub fn with_cache(mut self, cache: RouteCache) -> Self {
        self.cache = cache;
        self
    }

    /// Build the final router
    ///
    /// Fails when no store was provided or the templates do not compile.
    pub fn build(self) -> Result<Router> {
        let store = self
            .store
            .ok_or_else(|| anyhow::anyhow!("InvoiceService is required. Call .with_store()"))?;
        self.config.validate()?;

        let pages = Pages::new().context("failed to compile page templates")?;
        let state = AppState {
            actions: ActionContext::new(store, self.cache, self.clock),
            pages: Arc::new(pages),
            config: Arc::new(self.config),
        };

        let app = health_routes()
            .merge(build_invoice_routes(state))
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds `listen_addr` from the configuration, and stops accepting
    /// connections on SIGTERM or Ctrl+C.
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_store(InMemoryInvoiceService::new())
    ///     .serve().await?;
    /// ```
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.listen_addr.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for a shutdown signal (SIGTERM or Ctrl+C)
///
/// A handler that cannot be installed never fires; the other one still does.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryInvoiceService;

    #[test]
    fn test_build_requires_store() {
        let err = ServerBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("with_store"));
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = DashboardConfig {
            items_per_page: 0,
            ..Default::default()
        };
        let result = ServerBuilder::new()
            .with_store(InMemoryInvoiceService::new())
            .with_config(config)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_with_store() {
        let result = ServerBuilder::new()
            .with_store(InMemoryInvoiceService::new())
            .build();
        assert!(result.is_ok());
    }
}
