//! In-memory implementation of InvoiceService for testing and development

use crate::core::error::StorageError;
use crate::core::invoice::{Customer, Invoice, InvoiceId, InvoiceListItem, InvoiceWrite};
use crate::core::service::InvoiceService;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    invoices: HashMap<InvoiceId, Invoice>,
    customers: HashMap<String, Customer>,
}

/// In-memory invoice store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Cloning shares the same tables.
#[derive(Clone, Default)]
pub struct InMemoryInvoiceService {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryInvoiceService {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with customers
    pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
        let store = Self::new();
        store.seed_customers(customers);
        store
    }

    pub fn seed_customers(&self, customers: impl IntoIterator<Item = Customer>) {
        if let Ok(mut tables) = self.tables.write() {
            for customer in customers {
                tables.customers.insert(customer.id.clone(), customer);
            }
        }
    }

    /// Insert a row as-is, keeping its id and date
    pub fn seed_invoice(&self, invoice: Invoice) {
        if let Ok(mut tables) = self.tables.write() {
            tables.invoices.insert(invoice.id.clone(), invoice);
        }
    }

    /// Number of stored invoices
    pub fn invoice_count(&self) -> usize {
        self.tables.read().map(|t| t.invoices.len()).unwrap_or(0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StorageError> {
        self.tables.read().map_err(|_| unavailable())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StorageError> {
        self.tables.write().map_err(|_| unavailable())
    }

    /// Invoices joined with their customer, filtered and newest first
    ///
    /// Invoices whose customer is unknown are left out, like an inner join.
    fn matching(&self, term: &str) -> Result<Vec<InvoiceListItem>, StorageError> {
        let tables = self.read()?;
        let needle = term.trim().to_lowercase();

        let mut items: Vec<InvoiceListItem> = tables
            .invoices
            .values()
            .filter_map(|invoice| {
                let customer = tables.customers.get(&invoice.customer_id)?;
                Some(InvoiceListItem {
                    id: invoice.id.clone(),
                    customer_id: customer.id.clone(),
                    name: customer.name.clone(),
                    email: customer.email.clone(),
                    image_url: customer.image_url.clone(),
                    amount: invoice.amount,
                    status: invoice.status,
                    date: invoice.date,
                })
            })
            .filter(|item| item.matches(&needle))
            .collect();

        // id as tie-breaker keeps paging stable
        items.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }
}

fn unavailable() -> StorageError {
    StorageError::Unavailable {
        backend: "in-memory".to_string(),
    }
}

#[async_trait]
impl InvoiceService for InMemoryInvoiceService {
    async fn insert(&self, invoice: InvoiceWrite) -> Result<InvoiceId, StorageError> {
        let mut tables = self.write()?;
        let id = InvoiceId::generate();
        tables
            .invoices
            .insert(id.clone(), invoice.into_invoice(id.clone()));
        Ok(id)
    }

    async fn update(&self, id: &InvoiceId, invoice: InvoiceWrite) -> Result<u64, StorageError> {
        let mut tables = self.write()?;
        match tables.invoices.get_mut(id) {
            Some(row) => {
                *row = invoice.into_invoice(id.clone());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &InvoiceId) -> Result<u64, StorageError> {
        let mut tables = self.write()?;
        Ok(tables.invoices.remove(id).map_or(0, |_| 1))
    }

    async fn get(&self, id: &InvoiceId) -> Result<Option<Invoice>, StorageError> {
        Ok(self.read()?.invoices.get(id).cloned())
    }

    async fn customers(&self) -> Result<Vec<Customer>, StorageError> {
        let mut customers: Vec<Customer> = self.read()?.customers.values().cloned().collect();
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(customers)
    }

    async fn search(
        &self,
        term: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<InvoiceListItem>, StorageError> {
        Ok(self
            .matching(term)?
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn count_matching(&self, term: &str) -> Result<usize, StorageError> {
        Ok(self.matching(term)?.len())
    }
}
