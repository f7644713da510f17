//! # Invoice Dashboard
//!
//! A server-rendered admin dashboard for the invoices of a small billing
//! system: a searchable, paginated listing plus create, edit and delete.
//!
//! ## Features
//!
//! - **Form Actions**: validated create/update/delete that revalidate the cached listing and redirect
//! - **Debounced Search**: the search box commits its term to the URL after a quiet interval
//! - **Pluggable Storage**: in-memory store by default, PostgreSQL behind the `postgres` feature
//! - **Configuration**: YAML file with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dashboard::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     ServerBuilder::new()
//!         .with_store(InMemoryInvoiceService::new())
//!         .with_config(DashboardConfig::load()?)
//!         .serve()
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        clock::{Clock, FixedClock, SystemClock},
        search::Navigator,
        service::InvoiceService,
    };

    // === Domain Types ===
    pub use crate::core::invoice::{
        Cents, Customer, Invoice, InvoiceId, InvoiceListItem, InvoiceStatus, InvoiceWrite,
    };

    // === Actions ===
    pub use crate::core::actions::{
        ActionContext, ActionRedirect, INVOICES_PATH, create_invoice, delete_invoice_by_id,
        update_invoice,
    };
    pub use crate::core::form::InvoiceForm;

    // === Search ===
    pub use crate::core::query::{PaginationMeta, SearchParams};
    pub use crate::core::search::{BrowserHistory, SearchBox};

    // === Errors ===
    pub use crate::core::error::{
        ConfigError, DashboardError, DashboardResult, EntityError, StorageError, ValidationError,
    };

    // === Config ===
    pub use crate::config::DashboardConfig;

    // === Storage ===
    pub use crate::storage::InMemoryInvoiceService;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresInvoiceService;

    // === Server ===
    pub use crate::core::cache::RouteCache;
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::NaiveDate;
    pub use std::sync::Arc;
}
