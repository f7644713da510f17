//! HTTP server: routing, handlers and page rendering

pub mod builder;
pub mod handlers;
pub mod pages;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
pub use pages::{Breadcrumb, Pages};
pub use router::{build_invoice_routes, health_routes};
