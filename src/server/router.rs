//! Route table for the dashboard

use crate::server::handlers::{
    AppState, create_invoice, create_invoice_page, dashboard_home, delete_invoice,
    edit_invoice_page, list_invoices, update_invoice,
};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};

/// Build the invoice page and action routes
///
/// - GET  /dashboard                          - redirect to the listing
/// - GET  /dashboard/invoices                 - listing (`?query=&page=`)
/// - POST /dashboard/invoices                 - create action
/// - GET  /dashboard/invoices/create          - create form
/// - GET  /dashboard/invoices/{id}/edit       - edit form
/// - POST /dashboard/invoices/{id}/edit       - update action
/// - POST /dashboard/invoices/{id}/delete     - delete action
pub fn build_invoice_routes(state: AppState) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard_home))
        .route("/dashboard/invoices", get(list_invoices).post(create_invoice))
        .route("/dashboard/invoices/create", get(create_invoice_page))
        .route(
            "/dashboard/invoices/{id}/edit",
            get(edit_invoice_page).post(update_invoice),
        )
        .route("/dashboard/invoices/{id}/delete", post(delete_invoice))
        .with_state(state)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "invoice-dashboard"
    }))
}
