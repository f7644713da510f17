//! Core module: invoice domain types, form validation, actions and the search box

pub mod actions;
pub mod cache;
pub mod clock;
pub mod error;
pub mod form;
pub mod invoice;
pub mod query;
pub mod search;
pub mod service;

pub use actions::{ActionContext, ActionRedirect, INVOICES_PATH};
pub use cache::RouteCache;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DashboardError, DashboardResult, StorageError};
pub use form::InvoiceForm;
pub use invoice::{Cents, Customer, Invoice, InvoiceId, InvoiceListItem, InvoiceStatus, InvoiceWrite};
pub use query::{PaginationMeta, SearchParams};
pub use search::{BrowserHistory, DebounceTimer, Navigator, SearchBox};
pub use service::InvoiceService;
