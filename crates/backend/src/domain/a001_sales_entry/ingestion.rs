use chrono::{Days, NaiveDate};
use contracts::domain::a001_sales_entry::{NewSalesEntry, SalesRecord};
use thiserror::Error;
use uuid::Uuid;

/// Ошибки приёма записи о продаже
#[derive(Debug, Error, PartialEq)]
pub enum SalesEntryError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Payment status implied by the money fields when the form does not set one
pub fn derive_payment_status(total_amount: f64, cash_received: f64) -> &'static str {
    let remaining = total_amount - cash_received;
    if total_amount > 0.0 && remaining <= 0.0 {
        "Paid"
    } else if cash_received > 0.0 {
        "Partial"
    } else {
        "Pending"
    }
}

/// Turn a form entry into a stored record with a fresh id
pub fn resolve_entry(entry: &NewSalesEntry) -> Result<SalesRecord, SalesEntryError> {
    resolve_entry_with_id(entry, Uuid::new_v4().to_string())
}

/// Resolve every derived money field of the entry.
///
/// gross = quantity * unit price; discount is the absolute amount if given,
/// otherwise the percentage of gross; total = gross - discount (never below
/// zero); remaining = total - cash received (never below zero).
pub fn resolve_entry_with_id(
    entry: &NewSalesEntry,
    id: String,
) -> Result<SalesRecord, SalesEntryError> {
    entry.validate().map_err(SalesEntryError::Validation)?;

    // Required fields are checked above; the calendar date is checked here only
    let date = NaiveDate::parse_from_str(entry.date.trim(), "%Y-%m-%d")
        .map_err(|e| SalesEntryError::InvalidDate(format!("{}: {}", entry.date, e)))?;

    let gross = entry.quantity * entry.unit_price;
    let discount = match (entry.discount_amount, entry.discount_percent) {
        (Some(amount), _) => amount,
        (None, Some(pct)) => gross * pct / 100.0,
        (None, None) => 0.0,
    };
    let total_amount = round2((gross - discount).max(0.0));
    let cash_received = round2(entry.cash_received.unwrap_or(0.0));
    let remaining_balance = round2((total_amount - cash_received).max(0.0));

    let payment_status = trimmed(&entry.payment_status)
        .unwrap_or_else(|| derive_payment_status(total_amount, cash_received).to_string());

    let due_date = match entry.term_days {
        Some(days) => {
            let due = date
                .checked_add_days(Days::new(days as u64))
                .ok_or_else(|| {
                    SalesEntryError::InvalidDate(format!(
                        "{} + {} days is out of range",
                        entry.date, days
                    ))
                })?;
            Some(due.format("%Y-%m-%d").to_string())
        }
        None => None,
    };

    Ok(SalesRecord {
        id,
        invoice_no: entry.invoice_no.trim().to_string(),
        status: trimmed(&entry.status).unwrap_or_else(|| "Pending".to_string()),
        date: date.format("%Y-%m-%d").to_string(),
        term_days: entry.term_days,
        due_date,
        customer: Some(entry.customer.trim().to_string()),
        product: Some(entry.product.trim().to_string()),
        revenue_category: entry.revenue_category.trim().to_string(),
        revenue_type: trimmed(&entry.revenue_type),
        unit: trimmed(&entry.unit),
        quantity: entry.quantity,
        unit_price: entry.unit_price,
        discount_amount: round2(discount),
        total_amount,
        cash_received,
        remaining_balance,
        payment_status,
        description: trimmed(&entry.description),
        notes: trimmed(&entry.notes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amoxicillin() -> NewSalesEntry {
        NewSalesEntry {
            invoice_no: "INV-001".into(),
            date: "2024-01-15".into(),
            customer: "Hospital A".into(),
            product: "Amoxicillin".into(),
            quantity: 100.0,
            unit_price: 25.5,
            revenue_category: "Prescription".into(),
            revenue_type: Some("Direct".into()),
            term_days: Some(30),
            discount_percent: Some(5.0),
            cash_received: Some(2422.5),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_derives_money_fields() {
        let record = resolve_entry_with_id(&amoxicillin(), "1".into()).unwrap();
        assert_eq!(record.id, "1");
        assert_eq!(record.discount_amount, 127.5);
        assert_eq!(record.total_amount, 2422.5);
        assert_eq!(record.remaining_balance, 0.0);
        assert_eq!(record.payment_status, "Paid");
        assert_eq!(record.due_date.as_deref(), Some("2024-02-14"));
        assert_eq!(record.status, "Pending");
    }

    #[test]
    fn test_absolute_discount_wins_over_percent() {
        let mut entry = amoxicillin();
        entry.discount_amount = Some(100.0);
        entry.cash_received = Some(1000.0);
        let record = resolve_entry_with_id(&entry, "2".into()).unwrap();
        assert_eq!(record.total_amount, 2450.0);
        assert_eq!(record.remaining_balance, 1450.0);
        assert_eq!(record.payment_status, "Partial");
    }

    #[test]
    fn test_explicit_payment_status_is_kept() {
        let mut entry = amoxicillin();
        entry.cash_received = None;
        entry.payment_status = Some("Overdue".into());
        let record = resolve_entry_with_id(&entry, "3".into()).unwrap();
        assert_eq!(record.payment_status, "Overdue");
        assert_eq!(record.remaining_balance, 2422.5);
    }

    #[test]
    fn test_discount_never_makes_total_negative() {
        let mut entry = amoxicillin();
        entry.discount_amount = Some(10_000.0);
        let record = resolve_entry_with_id(&entry, "4".into()).unwrap();
        assert_eq!(record.total_amount, 0.0);
        assert_eq!(record.remaining_balance, 0.0);
    }

    #[test]
    fn test_derive_payment_status() {
        assert_eq!(derive_payment_status(100.0, 100.0), "Paid");
        assert_eq!(derive_payment_status(100.0, 40.0), "Partial");
        assert_eq!(derive_payment_status(100.0, 0.0), "Pending");
        assert_eq!(derive_payment_status(0.0, 0.0), "Pending");
    }

    #[test]
    fn test_invalid_entry_is_rejected() {
        let mut entry = amoxicillin();
        entry.customer = String::new();
        let err = resolve_entry_with_id(&entry, "5".into()).unwrap_err();
        assert!(matches!(err, SalesEntryError::Validation(_)));
    }

    #[test]
    fn test_unparseable_date_is_invalid_date() {
        let mut entry = amoxicillin();
        entry.date = "15.01.2024".into();
        let err = resolve_entry_with_id(&entry, "6".into()).unwrap_err();
        assert!(matches!(err, SalesEntryError::InvalidDate(_)));

        entry.date = String::new();
        let err = resolve_entry_with_id(&entry, "7".into()).unwrap_err();
        assert_eq!(err, SalesEntryError::Validation("Date is required".into()));
    }

    #[test]
    fn test_resolve_entry_assigns_unique_ids() {
        let a = resolve_entry(&amoxicillin()).unwrap();
        let b = resolve_entry(&amoxicillin()).unwrap();
        assert_ne!(a.id, b.id);
    }
}
