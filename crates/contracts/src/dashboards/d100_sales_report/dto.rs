use serde::{Deserialize, Serialize};

/// Response for the sales report dashboard
///
/// Derived from the current set of sales records and recomputed on every
/// request; it is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Revenue per month label, in order of first appearance
    pub monthly_series: Vec<MonthlyRevenue>,
    /// Revenue per category, in order of first appearance
    pub category_breakdown: Vec<CategoryShare>,
    /// Up to five products with the largest sold quantity
    pub top_products: Vec<ProductQuantity>,
    /// Record count per payment status, in order of first appearance
    pub payment_breakdown: Vec<PaymentShare>,
    pub total_revenue: f64,
    pub total_orders: u64,
    pub average_order_value: f64,
    /// Records whose payment status is "Pending" or "Partial"
    pub pending_payment_count: u64,
}

/// Point of the monthly revenue line chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    /// Short month name, e.g. "Jan"
    pub month: String,
    pub revenue: f64,
}

/// Slice of the revenue-by-category pie chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub revenue: f64,
    /// Share of total revenue, one decimal
    pub percentage: f64,
}

/// Bar of the top products chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductQuantity {
    pub product: String,
    pub quantity: f64,
}

/// Slice of the payment status pie chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentShare {
    pub status: String,
    pub count: u64,
    /// Share of all records, one decimal
    pub percentage: f64,
}
