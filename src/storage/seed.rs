//! Sample data for local development

use crate::core::invoice::{Cents, Customer, Invoice, InvoiceId, InvoiceStatus};
use crate::storage::InMemoryInvoiceService;
use chrono::NaiveDate;

const CUSTOMERS: [(&str, &str, &str, &str); 6] = [
    ("d6e15727-9fe1-4961-8c5b-ea44a9bd81aa", "Evil Rabbit", "evil@rabbit.com", "/customers/evil-rabbit.png"),
    ("3958dc9e-712f-4377-85e9-fec4b6a6442a", "Delba de Oliveira", "delba@oliveira.com", "/customers/delba-de-oliveira.png"),
    ("3958dc9e-742f-4377-85e9-fec4b6a6442a", "Lee Robinson", "lee@robinson.com", "/customers/lee-robinson.png"),
    ("76d65c26-f784-44a2-ac19-586678f7c2f2", "Michael Novotny", "michael@novotny.com", "/customers/michael-novotny.png"),
    ("cc27c14a-0acf-4f4a-a6c9-d45682c144b9", "Amy Burns", "amy@burns.com", "/customers/amy-burns.png"),
    ("13d07535-c59e-4157-a011-f8d2ef4e0cbb", "Balazs Orban", "balazs@orban.com", "/customers/balazs-orban.png"),
];

// (customer index, cents, status, date)
const INVOICES: [(usize, i64, InvoiceStatus, &str); 13] = [
    (0, 15795, InvoiceStatus::Pending, "2022-12-06"),
    (1, 20348, InvoiceStatus::Pending, "2022-11-14"),
    (4, 3040, InvoiceStatus::Paid, "2022-10-29"),
    (3, 44800, InvoiceStatus::Paid, "2023-09-10"),
    (5, 34577, InvoiceStatus::Pending, "2023-08-05"),
    (2, 54246, InvoiceStatus::Pending, "2023-07-16"),
    (0, 666, InvoiceStatus::Pending, "2023-06-27"),
    (3, 32545, InvoiceStatus::Paid, "2023-06-09"),
    (4, 1250, InvoiceStatus::Paid, "2023-06-17"),
    (5, 8546, InvoiceStatus::Paid, "2023-06-07"),
    (1, 500, InvoiceStatus::Paid, "2023-08-19"),
    (5, 8945, InvoiceStatus::Paid, "2023-06-03"),
    (2, 1000, InvoiceStatus::Paid, "2022-06-05"),
];

pub fn sample_customers() -> Vec<Customer> {
    CUSTOMERS
        .iter()
        .map(|(id, name, email, image_url)| Customer {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            image_url: image_url.to_string(),
        })
        .collect()
}

pub fn sample_invoices() -> Vec<Invoice> {
    INVOICES
        .iter()
        .filter_map(|(customer, cents, status, date)| {
            Some(Invoice {
                id: InvoiceId::generate(),
                customer_id: CUSTOMERS[*customer].0.to_string(),
                amount: Cents(*cents),
                status: *status,
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?,
            })
        })
        .collect()
}

/// In-memory store holding the sample customers and invoices
pub fn sample_store() -> InMemoryInvoiceService {
    let store = InMemoryInvoiceService::with_customers(sample_customers());
    for invoice in sample_invoices() {
        store.seed_invoice(invoice);
    }
    store
}
