//! Server-rendered pages
//!
//! Templates live in `templates/` and are compiled into the binary. Each
//! page has a serializable view struct; handlers build the view and
//! [`Pages`] turns it into HTML.

use crate::core::actions::INVOICES_PATH;
use crate::core::error::DashboardResult;
use crate::core::invoice::{Customer, Invoice, InvoiceListItem, InvoiceStatus};
use crate::core::query::{PaginationMeta, page_window};
use serde::Serialize;
use tera::{Context, Tera};

const TEMPLATES: [(&str, &str); 5] = [
    ("layout.html", include_str!("../../templates/layout.html")),
    ("breadcrumbs.html", include_str!("../../templates/breadcrumbs.html")),
    ("search.html", include_str!("../../templates/search.html")),
    ("invoices.html", include_str!("../../templates/invoices.html")),
    ("invoice_form.html", include_str!("../../templates/invoice_form.html")),
];

/// One entry of the breadcrumbs widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    pub href: String,
    pub active: bool,
}

impl Breadcrumb {
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            active: false,
        }
    }

    pub fn active(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            active: true,
            ..Self::link(label, href)
        }
    }
}

#[derive(Debug, Serialize)]
struct InvoiceRowView {
    id: String,
    name: String,
    email: String,
    image_url: String,
    amount: String,
    date: String,
    status: &'static str,
}

impl From<&InvoiceListItem> for InvoiceRowView {
    fn from(item: &InvoiceListItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            email: item.email.clone(),
            image_url: item.image_url.clone(),
            amount: item.amount.format_currency(),
            date: item.date.format("%b %-d, %Y").to_string(),
            status: item.status.as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PageLinkView {
    label: String,
    href: Option<String>,
    current: bool,
}

#[derive(Debug, Serialize)]
struct PaginationView {
    total_pages: usize,
    prev_href: Option<String>,
    next_href: Option<String>,
    links: Vec<PageLinkView>,
}

/// Listing URL for `page`, keeping the search term
pub fn page_href(term: &str, page: usize) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    if !term.is_empty() {
        query.append_pair("query", term);
    }
    query.append_pair("page", &page.to_string());
    format!("{}?{}", INVOICES_PATH, query.finish())
}

impl PaginationView {
    fn new(term: &str, meta: &PaginationMeta) -> Self {
        let links = page_window(meta.page, meta.total_pages)
            .into_iter()
            .map(|entry| match entry {
                Some(page) => PageLinkView {
                    label: page.to_string(),
                    href: Some(page_href(term, page)),
                    current: page == meta.page,
                },
                None => PageLinkView {
                    label: "...".to_string(),
                    href: None,
                    current: false,
                },
            })
            .collect();

        Self {
            total_pages: meta.total_pages,
            prev_href: meta.has_prev().then(|| page_href(term, meta.page - 1)),
            next_href: meta.has_next().then(|| page_href(term, meta.page + 1)),
            links,
        }
    }
}

#[derive(Debug, Serialize)]
struct ListingView<'a> {
    listing_path: &'static str,
    placeholder: &'static str,
    query: &'a str,
    debounce_ms: u64,
    invoices: Vec<InvoiceRowView>,
    pagination: PaginationView,
}

#[derive(Debug, Serialize)]
struct FormView<'a> {
    title: &'static str,
    listing_path: &'static str,
    breadcrumbs: Vec<Breadcrumb>,
    action: String,
    submit_label: &'static str,
    customers: &'a [Customer],
    selected_customer: &'a str,
    amount: String,
    statuses: Vec<&'static str>,
    selected_status: &'static str,
}

/// Compiled templates
pub struct Pages {
    tera: Tera,
}

impl Pages {
    pub fn new() -> DashboardResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera })
    }

    fn render<T: Serialize>(&self, template: &str, view: &T) -> DashboardResult<String> {
        let context = Context::from_serialize(view)?;
        Ok(self.tera.render(template, &context)?)
    }

    /// Invoice table with search box and pagination
    pub fn invoices(
        &self,
        term: &str,
        items: &[InvoiceListItem],
        meta: &PaginationMeta,
        debounce_ms: u64,
    ) -> DashboardResult<String> {
        self.render(
            "invoices.html",
            &ListingView {
                listing_path: INVOICES_PATH,
                placeholder: "Search invoices...",
                query: term,
                debounce_ms,
                invoices: items.iter().map(InvoiceRowView::from).collect(),
                pagination: PaginationView::new(term, meta),
            },
        )
    }

    /// Empty form posting to the create action
    pub fn create_form(&self, customers: &[Customer]) -> DashboardResult<String> {
        let href = format!("{}/create", INVOICES_PATH);
        self.render(
            "invoice_form.html",
            &FormView {
                title: "Create Invoice",
                listing_path: INVOICES_PATH,
                breadcrumbs: vec![
                    Breadcrumb::link("Invoices", INVOICES_PATH),
                    Breadcrumb::active("Create Invoice", href),
                ],
                action: INVOICES_PATH.to_string(),
                submit_label: "Create Invoice",
                customers,
                selected_customer: "",
                amount: String::new(),
                statuses: status_values(),
                selected_status: "",
            },
        )
    }

    /// Form prefilled from `invoice`, posting to its update action
    pub fn edit_form(&self, invoice: &Invoice, customers: &[Customer]) -> DashboardResult<String> {
        let href = format!("{}/{}/edit", INVOICES_PATH, invoice.id);
        self.render(
            "invoice_form.html",
            &FormView {
                title: "Edit Invoice",
                listing_path: INVOICES_PATH,
                breadcrumbs: vec![
                    Breadcrumb::link("Invoices", INVOICES_PATH),
                    Breadcrumb::active("Update Invoice", href.clone()),
                ],
                action: href,
                submit_label: "Edit Invoice",
                customers,
                selected_customer: &invoice.customer_id,
                amount: format!("{:.2}", invoice.amount.to_major()),
                statuses: status_values(),
                selected_status: invoice.status.as_str(),
            },
        )
    }
}

fn status_values() -> Vec<&'static str> {
    InvoiceStatus::ALL.iter().map(InvoiceStatus::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::invoice::{Cents, InvoiceId};
    use chrono::NaiveDate;

    fn customers() -> Vec<Customer> {
        vec![Customer {
            id: "c1".to_string(),
            name: "Evil Rabbit".to_string(),
            email: "evil@rabbit.com".to_string(),
            image_url: "/customers/evil-rabbit.png".to_string(),
        }]
    }

    #[test]
    fn test_page_href_keeps_term() {
        assert_eq!(page_href("", 2), "/dashboard/invoices?page=2");
        assert_eq!(
            page_href("lee rob", 1),
            "/dashboard/invoices?query=lee+rob&page=1"
        );
    }

    #[test]
    fn test_listing_renders_rows_and_search_value() {
        let pages = Pages::new().unwrap();
        let items = vec![InvoiceListItem {
            id: InvoiceId::new("inv-1"),
            customer_id: "c1".to_string(),
            name: "Evil Rabbit".to_string(),
            email: "evil@rabbit.com".to_string(),
            image_url: "/customers/evil-rabbit.png".to_string(),
            amount: Cents(4500),
            status: InvoiceStatus::Paid,
            date: NaiveDate::from_ymd_opt(2023, 6, 27).unwrap(),
        }];
        let meta = PaginationMeta::new(1, 6, 1);
        let html = pages.invoices("evil", &items, &meta, 1000).unwrap();

        assert!(html.contains("Evil Rabbit"));
        assert!(html.contains("$45.00"));
        assert!(html.contains("Jun 27, 2023"));
        assert!(html.contains(r#"value="evil""#));
        assert!(html.contains("&#x2F;dashboard&#x2F;invoices&#x2F;inv-1&#x2F;delete"));
        assert!(!html.contains("Pagination"));
    }

    #[test]
    fn test_listing_escapes_search_term() {
        let pages = Pages::new().unwrap();
        let html = pages
            .invoices(r#""><b>"#, &[], &PaginationMeta::new(1, 6, 0), 1000)
            .unwrap();
        assert!(!html.contains("<b>"));
        assert!(html.contains(r#"value="&quot;&gt;&lt;b&gt;""#));
        assert!(html.contains("No invoices found."));
    }

    #[test]
    fn test_listing_wires_debounced_search_script() {
        let pages = Pages::new().unwrap();
        let html = pages
            .invoices("lee", &[], &PaginationMeta::new(1, 6, 0), 250)
            .unwrap();
        assert!(html.contains(r#"data-debounce-ms="250""#));
        assert!(html.contains("<script>"));
        assert!(html.contains("searchParams.delete(\"query\")"));
        assert!(html.contains("window.location.replace"));
    }

    #[test]
    fn test_edit_form_is_prefilled() {
        let pages = Pages::new().unwrap();
        let invoice = Invoice {
            id: InvoiceId::new("inv-9"),
            customer_id: "c1".to_string(),
            amount: Cents(15795),
            status: InvoiceStatus::Pending,
            date: NaiveDate::from_ymd_opt(2022, 12, 6).unwrap(),
        };
        let html = pages.edit_form(&invoice, &customers()).unwrap();

        assert!(html.contains(r#"action="&#x2F;dashboard&#x2F;invoices&#x2F;inv-9&#x2F;edit""#));
        assert!(html.contains(r#"value="157.95""#));
        assert!(html.contains(r#"<option value="c1" selected>"#));
        assert!(html.contains(r#"value="pending" checked"#));
        assert!(html.contains(r#"aria-current="page""#));
        assert!(html.contains("Update Invoice"));
    }

    #[test]
    fn test_create_form_posts_to_listing() {
        let pages = Pages::new().unwrap();
        let html = pages.create_form(&customers()).unwrap();
        assert!(html.contains(r#"action="&#x2F;dashboard&#x2F;invoices""#));
        assert!(html.contains("Evil Rabbit"));
        assert!(!html.contains("checked"));
    }
}
