//! Invoice form schema
//!
//! Form submissions arrive as a flat string-keyed field set. [`InvoiceForm::parse`]
//! checks the whole set against the schema and either returns typed values or
//! every field error at once; there is no partial result.

use crate::core::error::{FieldValidationError, ValidationError};
use crate::core::invoice::{Cents, InvoiceStatus, InvoiceWrite};
use chrono::NaiveDate;
use std::borrow::Cow;
use std::collections::HashMap;
use validator::{Validate, ValidationError as FieldRuleError, ValidationErrors};

pub const CUSTOMER_ID_FIELD: &str = "customerId";
pub const AMOUNT_FIELD: &str = "amount";
pub const STATUS_FIELD: &str = "status";

/// Raw field values as submitted
#[derive(Debug, Validate)]
struct RawInvoiceFields {
    #[validate(length(min = 1, message = "Please select a customer."))]
    customer_id: String,

    #[validate(custom(function = "validate_amount"))]
    amount: String,

    #[validate(custom(function = "validate_status"))]
    status: String,
}

fn rule_error(code: &'static str, message: &'static str) -> FieldRuleError {
    FieldRuleError::new(code).with_message(Cow::Borrowed(message))
}

/// Coerce the submitted amount the way a numeric form input is read
fn coerce_amount(raw: &str) -> Result<f64, FieldRuleError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(rule_error("required", "Please enter an amount."));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| rule_error("not_a_number", "Amount must be a number."))?;
    if !value.is_finite() {
        return Err(rule_error("not_finite", "Amount must be a finite number."));
    }
    // i64::MAX as f64 rounds up to 2^63, which no longer fits
    let cents = (value * 100.0).round();
    if cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
        return Err(rule_error("out_of_range", "Amount is too large."));
    }
    Ok(value)
}

fn validate_amount(raw: &str) -> Result<(), FieldRuleError> {
    coerce_amount(raw).map(|_| ())
}

fn validate_status(raw: &str) -> Result<(), FieldRuleError> {
    raw.parse::<InvoiceStatus>()
        .map(|_| ())
        .map_err(|_| rule_error("invalid_status", "Status must be one of: pending, paid."))
}

/// Map validator's snake_case struct fields back to the form's field names
fn form_field_name(field: &str) -> &str {
    match field {
        "customer_id" => CUSTOMER_ID_FIELD,
        "amount" => AMOUNT_FIELD,
        "status" => STATUS_FIELD,
        other => other,
    }
}

fn into_field_errors(errors: ValidationErrors) -> ValidationError {
    let mut fields: Vec<FieldValidationError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let name = form_field_name(field.as_ref()).to_string();
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                FieldValidationError::new(name.clone(), message)
            })
        })
        .collect();
    // HashMap iteration order is unspecified
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    ValidationError::FieldErrors(fields)
}

/// A submitted invoice form that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceForm {
    pub customer_id: String,
    /// Amount in major units, exactly as typed
    pub amount: f64,
    pub status: InvoiceStatus,
}

impl InvoiceForm {
    /// Validate a submitted field set
    ///
    /// Only `customerId`, `amount` and `status` are read; an `id` or `date`
    /// in the submission is ignored.
    pub fn parse(fields: &HashMap<String, String>) -> Result<Self, ValidationError> {
        let field = |name: &str| fields.get(name).cloned().unwrap_or_default();
        let raw = RawInvoiceFields {
            customer_id: field(CUSTOMER_ID_FIELD),
            amount: field(AMOUNT_FIELD),
            status: field(STATUS_FIELD),
        };

        raw.validate().map_err(into_field_errors)?;

        let amount = coerce_amount(&raw.amount).map_err(|e| {
            ValidationError::FieldErrors(vec![FieldValidationError::new(
                AMOUNT_FIELD,
                e.to_string(),
            )])
        })?;
        let status = raw.status.parse::<InvoiceStatus>().map_err(|e| {
            ValidationError::FieldErrors(vec![FieldValidationError::new(
                STATUS_FIELD,
                e.to_string(),
            )])
        })?;

        Ok(Self {
            customer_id: raw.customer_id,
            amount,
            status,
        })
    }

    /// Values for the write statement, stamped with `date`
    pub fn into_write(self, date: NaiveDate) -> InvoiceWrite {
        InvoiceWrite {
            customer_id: self.customer_id,
            amount: Cents::from_major(self.amount),
            status: self.status,
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_valid_form() {
        let form = InvoiceForm::parse(&fields(&[
            ("customerId", "3958dc9e-712f-4377-85e9-fec4b6a6442a"),
            ("amount", "45.00"),
            ("status", "paid"),
        ]))
        .unwrap();
        assert_eq!(form.customer_id, "3958dc9e-712f-4377-85e9-fec4b6a6442a");
        assert_eq!(form.amount, 45.0);
        assert_eq!(form.status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_amount_is_trimmed_before_coercion() {
        let form = InvoiceForm::parse(&fields(&[
            ("customerId", "c1"),
            ("amount", " 12.5 "),
            ("status", "pending"),
        ]))
        .unwrap();
        assert_eq!(form.amount, 12.5);
    }

    #[test]
    fn test_status_outside_enum_is_rejected() {
        let err = InvoiceForm::parse(&fields(&[
            ("customerId", "c1"),
            ("amount", "10"),
            ("status", "archived"),
        ]))
        .unwrap_err();
        assert!(err.has_field(STATUS_FIELD));
        assert_eq!(err.fields().len(), 1);
    }

    #[test]
    fn test_non_numeric_amount_is_rejected() {
        for bad in ["ten", "", "   ", "NaN", "inf"] {
            let err = InvoiceForm::parse(&fields(&[
                ("customerId", "c1"),
                ("amount", bad),
                ("status", "paid"),
            ]))
            .unwrap_err();
            assert!(err.has_field(AMOUNT_FIELD), "amount {:?} accepted", bad);
        }
    }

    #[test]
    fn test_amount_beyond_cents_range_is_rejected() {
        for bad in ["1e300", "-1e300", "92233720368547758.08"] {
            let err = InvoiceForm::parse(&fields(&[
                ("customerId", "c1"),
                ("amount", bad),
                ("status", "paid"),
            ]))
            .unwrap_err();
            assert!(err.has_field(AMOUNT_FIELD), "amount {:?} accepted", bad);
        }

        let form = InvoiceForm::parse(&fields(&[
            ("customerId", "c1"),
            ("amount", "1e15"),
            ("status", "paid"),
        ]))
        .unwrap();
        let write = form.into_write(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(write.amount, Cents(100_000_000_000_000_000));
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let err = InvoiceForm::parse(&HashMap::new()).unwrap_err();
        assert!(err.has_field(CUSTOMER_ID_FIELD));
        assert!(err.has_field(AMOUNT_FIELD));
        assert!(err.has_field(STATUS_FIELD));
        // sorted by field name
        assert_eq!(err.fields()[0].field, AMOUNT_FIELD);
    }

    #[test]
    fn test_into_write_converts_to_cents() {
        let form = InvoiceForm {
            customer_id: "c1".to_string(),
            amount: 45.0,
            status: InvoiceStatus::Pending,
        };
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let write = form.into_write(date);
        assert_eq!(write.amount, Cents(4500));
        assert_eq!(write.date, date);
    }
}
