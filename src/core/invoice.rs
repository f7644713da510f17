//! Invoice and customer records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque invoice identifier
///
/// Identifiers are generated by the store on insert and never parsed by the
/// dashboard; any string is accepted at the route boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(String);

impl InvoiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InvoiceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Payment status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 2] = [InvoiceStatus::Pending, InvoiceStatus::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a status string is neither `pending` nor `paid`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown invoice status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for InvoiceStatus {
    type Err = UnknownStatus;

    /// Exact, case-sensitive match
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Money in minor currency units (cents)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(pub i64);

impl Cents {
    /// `round(amount * 100)`
    ///
    /// Callers must pass a finite value whose cents fit in an `i64`; form
    /// parsing rejects anything else before this point.
    pub fn from_major(amount: f64) -> Self {
        Cents((amount * 100.0).round() as i64)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Major units, as shown in the edit form's amount field
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// `$1,234.50` style display
    pub fn format_currency(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let dollars = (abs / 100).to_string();
        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (i, ch) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        format!("{}${}.{:02}", sign, grouped, abs % 100)
    }
}

/// A stored invoice row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub customer_id: String,
    pub amount: Cents,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Values written by the create and update statements
///
/// Carries everything except the identifier, which the store assigns on
/// insert and the route supplies on update.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceWrite {
    pub customer_id: String,
    pub amount: Cents,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

impl InvoiceWrite {
    pub fn into_invoice(self, id: InvoiceId) -> Invoice {
        Invoice {
            id,
            customer_id: self.customer_id,
            amount: self.amount,
            status: self.status,
            date: self.date,
        }
    }
}

/// Customer record (read-only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Invoice joined with its customer, as shown in the listing table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceListItem {
    pub id: InvoiceId,
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub amount: Cents,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

impl InvoiceListItem {
    /// Case-insensitive match against the searchable columns
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.amount.value().to_string().contains(needle)
            || self.date.format("%Y-%m-%d").to_string().contains(needle)
            || self.status.as_str().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_exact_values_only() {
        assert_eq!("pending".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Pending));
        assert_eq!("paid".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Paid));
        assert!("archived".parse::<InvoiceStatus>().is_err());
        assert!("Paid".parse::<InvoiceStatus>().is_err());
        assert!("".parse::<InvoiceStatus>().is_err());
    }

    #[test]
    fn test_cents_rounds_to_nearest() {
        assert_eq!(Cents::from_major(45.00), Cents(4500));
        assert_eq!(Cents::from_major(0.29), Cents(29));
        assert_eq!(Cents::from_major(19.999), Cents(2000));
        assert_eq!(Cents::from_major(-1.5), Cents(-150));
    }

    #[test]
    fn test_currency_formatting() {
        assert_eq!(Cents(4500).format_currency(), "$45.00");
        assert_eq!(Cents(5).format_currency(), "$0.05");
        assert_eq!(Cents(123_456_789).format_currency(), "$1,234,567.89");
        assert_eq!(Cents(-250).format_currency(), "-$2.50");
    }

    #[test]
    fn test_list_item_matching() {
        let item = InvoiceListItem {
            id: InvoiceId::new("1"),
            customer_id: "c1".to_string(),
            name: "Delba de Oliveira".to_string(),
            email: "delba@oliveira.com".to_string(),
            image_url: "/customers/delba.png".to_string(),
            amount: Cents(15795),
            status: InvoiceStatus::Pending,
            date: NaiveDate::from_ymd_opt(2022, 12, 6).unwrap(),
        };
        assert!(item.matches(""));
        assert!(item.matches("delba"));
        assert!(item.matches("oliveira.com"));
        assert!(item.matches("157"));
        assert!(item.matches("2022-12"));
        assert!(item.matches("pend"));
        assert!(!item.matches("paid"));
    }
}
