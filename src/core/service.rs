//! Storage service trait for invoices and customers

use crate::core::error::StorageError;
use crate::core::invoice::{Customer, Invoice, InvoiceId, InvoiceListItem, InvoiceWrite};
use async_trait::async_trait;

/// Storage client injected into every action and page handler
///
/// Each write method issues exactly one statement. Implementations hold no
/// per-request state; any pooled connection is borrowed for the duration of
/// the call and returned before it completes.
#[async_trait]
pub trait InvoiceService: Send + Sync {
    /// INSERT one invoice and return its generated identifier
    async fn insert(&self, invoice: InvoiceWrite) -> Result<InvoiceId, StorageError>;

    /// UPDATE the row matching `id`, replacing every column but the id
    ///
    /// Returns the number of rows affected (0 when `id` is unknown).
    async fn update(&self, id: &InvoiceId, invoice: InvoiceWrite) -> Result<u64, StorageError>;

    /// DELETE the row matching `id`
    ///
    /// Returns the number of rows affected (0 when `id` is unknown).
    async fn delete(&self, id: &InvoiceId) -> Result<u64, StorageError>;

    /// Fetch one invoice by id
    async fn get(&self, id: &InvoiceId) -> Result<Option<Invoice>, StorageError>;

    /// All customers, ordered by name
    async fn customers(&self) -> Result<Vec<Customer>, StorageError>;

    /// Invoices joined with customers, matching `term`, newest first
    ///
    /// `term` is matched case-insensitively against customer name, email,
    /// amount, date and status. An empty term matches everything.
    async fn search(
        &self,
        term: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<InvoiceListItem>, StorageError>;

    /// Number of invoices matching `term`
    async fn count_matching(&self, term: &str) -> Result<usize, StorageError>;
}
