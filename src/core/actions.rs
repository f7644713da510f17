//! Form-submit actions: create, update and delete invoices
//!
//! Each action validates its input before touching storage, issues exactly
//! one statement, marks the invoice listing stale and answers with a
//! redirect to the listing. The redirect is the success path.
//!
//! ```rust,ignore
//! let ctx = ActionContext::new(store, cache, Arc::new(SystemClock));
//! let redirect = create_invoice(&ctx, &fields).await?;
//! assert_eq!(redirect.location(), "/dashboard/invoices");
//! ```

use crate::core::cache::RouteCache;
use crate::core::clock::Clock;
use crate::core::error::DashboardResult;
use crate::core::form::InvoiceForm;
use crate::core::invoice::InvoiceId;
use crate::core::service::InvoiceService;
use axum::response::{IntoResponse, Redirect, Response};
use std::collections::HashMap;
use std::sync::Arc;

/// Listing page every action revalidates and redirects to
pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// Collaborators shared by every action invocation
#[derive(Clone)]
pub struct ActionContext {
    pub store: Arc<dyn InvoiceService>,
    pub cache: RouteCache,
    pub clock: Arc<dyn Clock>,
}

impl ActionContext {
    pub fn new(store: Arc<dyn InvoiceService>, cache: RouteCache, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            cache,
            clock,
        }
    }
}

/// Successful outcome of an action: send the browser elsewhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRedirect {
    location: String,
}

impl ActionRedirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl IntoResponse for ActionRedirect {
    fn into_response(self) -> Response {
        // 303 so the browser follows the POST with a GET
        Redirect::to(&self.location).into_response()
    }
}

/// Validate `fields`, insert one invoice in cents dated today
pub async fn create_invoice(
    ctx: &ActionContext,
    fields: &HashMap<String, String>,
) -> DashboardResult<ActionRedirect> {
    let form = InvoiceForm::parse(fields)?;
    let write = form.into_write(ctx.clock.today());

    let customer_id = write.customer_id.clone();
    let amount_cents = write.amount.value();
    let id = ctx.store.insert(write).await?;

    tracing::info!(
        invoice_id = %id,
        customer_id = %customer_id,
        amount_cents,
        "invoice created"
    );

    ctx.cache.revalidate_path(INVOICES_PATH);
    Ok(ActionRedirect::to(INVOICES_PATH))
}

/// Validate `fields`, replace customer, amount, status and date of `id`
///
/// The stored date is always re-stamped to today. An unknown `id` updates
/// nothing and still redirects.
pub async fn update_invoice(
    ctx: &ActionContext,
    id: &InvoiceId,
    fields: &HashMap<String, String>,
) -> DashboardResult<ActionRedirect> {
    let form = InvoiceForm::parse(fields)?;
    let write = form.into_write(ctx.clock.today());

    let amount_cents = write.amount.value();
    let affected = ctx.store.update(id, write).await?;

    if affected == 0 {
        tracing::warn!(invoice_id = %id, "update matched no invoice");
    } else {
        tracing::info!(invoice_id = %id, amount_cents, "invoice updated");
    }

    ctx.cache.revalidate_path(INVOICES_PATH);
    Ok(ActionRedirect::to(INVOICES_PATH))
}

/// Remove the invoice bound to this action
///
/// Deleting an unknown id is a no-op.
pub async fn delete_invoice_by_id(
    ctx: &ActionContext,
    id: &InvoiceId,
) -> DashboardResult<ActionRedirect> {
    let affected = ctx.store.delete(id).await?;
    tracing::info!(invoice_id = %id, affected, "invoice deleted");

    ctx.cache.revalidate_path(INVOICES_PATH);
    Ok(ActionRedirect::to(INVOICES_PATH))
}
