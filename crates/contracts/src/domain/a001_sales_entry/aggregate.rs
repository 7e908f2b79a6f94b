use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Payment statuses that count as "awaiting payment" on the dashboard
pub const PENDING_PAYMENT_STATUSES: [&str; 2] = ["Pending", "Partial"];

/// Запись о продаже (a001)
///
/// A record is a value: once stored it is never mutated, and the report
/// aggregation only reads it. Every monetary derivation (discount, net amount,
/// remaining balance) has already been resolved into `total_amount` by the
/// ingestion step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub id: String,

    // Document
    pub invoice_no: String,
    pub status: String,
    /// Sale date, "YYYY-MM-DD" (an RFC 3339 timestamp is tolerated)
    pub date: String,
    pub term_days: Option<i32>,
    pub due_date: Option<String>,

    // Dimensions
    pub customer: Option<String>,
    pub product: Option<String>,
    pub revenue_category: String,
    pub revenue_type: Option<String>,
    pub unit: Option<String>,

    // Sums
    pub quantity: f64,
    pub unit_price: f64,
    pub discount_amount: f64,
    /// Net amount attributed to the record
    pub total_amount: f64,
    pub cash_received: f64,
    pub remaining_balance: f64,
    pub payment_status: String,

    // Info fields
    pub description: Option<String>,
    pub notes: Option<String>,
}

impl SalesRecord {
    /// Parsed sale date, `None` when the stored value is not a calendar date
    pub fn sale_date(&self) -> Option<NaiveDate> {
        parse_sales_date(&self.date)
    }

    pub fn is_payment_pending(&self) -> bool {
        PENDING_PAYMENT_STATUSES.contains(&self.payment_status.as_str())
    }
}

/// Parse "YYYY-MM-DD" or the date part of "YYYY-MM-DDTHH:MM:SS..."
pub fn parse_sales_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.trim().split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Форма ввода новой продажи
///
/// Only the identifying fields are mandatory; money fields that are not
/// supplied default to zero and are resolved during ingestion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewSalesEntry {
    pub invoice_no: String,
    pub date: String,
    pub customer: String,
    pub product: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub revenue_category: String,
    #[serde(default)]
    pub revenue_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub term_days: Option<i32>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Discount as a percentage of gross revenue (0..=100)
    #[serde(default)]
    pub discount_percent: Option<f64>,
    /// Absolute discount, wins over `discount_percent` when both are set
    #[serde(default)]
    pub discount_amount: Option<f64>,
    #[serde(default)]
    pub cash_received: Option<f64>,
    #[serde(default)]
    pub payment_status: Option<String>,
}

impl NewSalesEntry {
    pub fn validate(&self) -> Result<(), String> {
        if self.invoice_no.trim().is_empty() {
            return Err("Invoice number is required".into());
        }
        if self.date.trim().is_empty() {
            return Err("Date is required".into());
        }
        if self.customer.trim().is_empty() {
            return Err("Customer is required".into());
        }
        if self.product.trim().is_empty() {
            return Err("Product is required".into());
        }
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(format!(
                "Quantity must be a non-negative number, got {}",
                self.quantity
            ));
        }
        if !self.unit_price.is_finite() || self.unit_price < 0.0 {
            return Err(format!(
                "Price must be a non-negative number, got {}",
                self.unit_price
            ));
        }
        if let Some(pct) = self.discount_percent {
            if !(0.0..=100.0).contains(&pct) {
                return Err(format!(
                    "Discount percent must be within 0..100, got {}",
                    pct
                ));
            }
        }
        for (name, value) in [
            ("Discount amount", self.discount_amount),
            ("Cash received", self.cash_received),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(format!("{} must be a non-negative number, got {}", name, v));
                }
            }
        }
        if matches!(self.term_days, Some(days) if days < 0) {
            return Err("Term days cannot be negative".into());
        }
        Ok(())
    }
}

/// Фильтры таблицы продаж
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesEntryListRequest {
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
    /// Case-insensitive substring match
    #[serde(default)]
    pub customer: Option<String>,
    /// Case-insensitive substring match
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub revenue_category: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub limit: Option<u64>,
}

impl SalesEntryListRequest {
    pub const DEFAULT_LIMIT: u64 = 1000;
    pub const MAX_LIMIT: u64 = 100_000;

    /// Limit used by the table view: default 1000, clamped to 1..=100000
    pub fn effective_limit(&self) -> u64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    /// True when the record passes every filter that is set.
    ///
    /// Same rules as the SQL query: dates compare on their first 10 characters
    /// and substring matches fold ASCII case only (SQLite `LIKE`).
    pub fn matches(&self, record: &SalesRecord) -> bool {
        fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
            haystack
                .map(|h| {
                    h.to_ascii_lowercase()
                        .contains(&needle.to_ascii_lowercase())
                })
                .unwrap_or(false)
        }

        let date = record.date.get(..10).unwrap_or(&record.date);
        if matches!(&self.date_from, Some(from) if date < from.as_str()) {
            return false;
        }
        if matches!(&self.date_to, Some(to) if date > to.as_str()) {
            return false;
        }
        if let Some(customer) = &self.customer {
            if !contains_ci(record.customer.as_deref(), customer) {
                return false;
            }
        }
        if let Some(product) = &self.product {
            if !contains_ci(record.product.as_deref(), product) {
                return false;
            }
        }
        if matches!(&self.revenue_category, Some(c) if *c != record.revenue_category) {
            return false;
        }
        if matches!(&self.payment_status, Some(s) if *s != record.payment_status) {
            return false;
        }
        true
    }
}

/// Ответ со списком продаж
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesEntryListResponse {
    pub items: Vec<SalesRecord>,
    /// Rows matching the filters, beyond the returned page too
    pub total_count: u64,
    pub has_more: bool,
}
