//! HTTP handlers for invoice pages and form actions
//!
//! Page handlers read through the injected [`InvoiceService`](crate::core::InvoiceService)
//! and render HTML; action handlers hand the submitted fields to
//! [`crate::core::actions`] and return its redirect.

use crate::config::DashboardConfig;
use crate::core::actions::{self, ActionContext, ActionRedirect, INVOICES_PATH};
use crate::core::error::{DashboardResult, EntityError};
use crate::core::invoice::InvoiceId;
use crate::core::query::{PaginationMeta, SearchParams, offset};
use crate::server::pages::Pages;
use axum::extract::{Form, Path, Query, RawQuery, State};
use axum::response::Html;
use std::collections::HashMap;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub actions: ActionContext,
    pub pages: Arc<Pages>,
    pub config: Arc<DashboardConfig>,
}

/// `GET /dashboard/invoices?query=&page=`
///
/// Served from the route cache until a write revalidates the listing.
pub async fn list_invoices(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
    RawQuery(raw): RawQuery,
) -> DashboardResult<Html<String>> {
    let cache_key = raw.unwrap_or_default();
    if let Some(body) = state.actions.cache.get(INVOICES_PATH, &cache_key) {
        return Ok(Html(body));
    }

    let term = params.term();
    let page = params.page();
    let per_page = state.config.items_per_page;
    let store = &state.actions.store;

    let (total, items) = futures::try_join!(
        store.count_matching(term),
        store.search(term, per_page, offset(page, per_page)),
    )?;
    let meta = PaginationMeta::new(page, per_page, total);

    let body = state
        .pages
        .invoices(term, &items, &meta, state.config.search_debounce_ms)?;
    state.actions.cache.insert(INVOICES_PATH, &cache_key, body.clone());

    Ok(Html(body))
}

/// `GET /dashboard/invoices/create`
pub async fn create_invoice_page(State(state): State<AppState>) -> DashboardResult<Html<String>> {
    let customers = state.actions.store.customers().await?;
    Ok(Html(state.pages.create_form(&customers)?))
}

/// `POST /dashboard/invoices`
pub async fn create_invoice(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> DashboardResult<ActionRedirect> {
    actions::create_invoice(&state.actions, &fields).await
}

/// `GET /dashboard/invoices/{id}/edit`
///
/// Customers and the invoice are fetched concurrently.
pub async fn edit_invoice_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> DashboardResult<Html<String>> {
    let id = InvoiceId::new(id);
    let store = &state.actions.store;

    let (customers, invoice) = futures::try_join!(store.customers(), store.get(&id))?;
    let invoice = invoice.ok_or_else(|| EntityError::NotFound {
        entity_type: "invoice".to_string(),
        id: id.to_string(),
    })?;

    Ok(Html(state.pages.edit_form(&invoice, &customers)?))
}

/// `POST /dashboard/invoices/{id}/edit`
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> DashboardResult<ActionRedirect> {
    actions::update_invoice(&state.actions, &InvoiceId::new(id), &fields).await
}

/// `POST /dashboard/invoices/{id}/delete`
///
/// The id comes from the route; the submitted body is ignored.
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> DashboardResult<ActionRedirect> {
    actions::delete_invoice_by_id(&state.actions, &InvoiceId::new(id)).await
}

/// `GET /dashboard`
pub async fn dashboard_home() -> ActionRedirect {
    ActionRedirect::to(INVOICES_PATH)
}
