use contracts::dashboards::d100_sales_report::{
    CategoryShare, MonthlyRevenue, PaymentShare, ProductQuantity, ReportSummary,
};
use contracts::domain::a001_sales_entry::SalesRecord;
use std::collections::HashMap;

use chrono::Datelike;

/// Fixed month labels, independent of the process locale
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const TOP_PRODUCTS_LIMIT: usize = 5;

const UNCATEGORIZED: &str = "Uncategorized";
const UNKNOWN_STATUS: &str = "Unknown";

/// Sums keyed by a string, remembering the order in which keys first appeared
#[derive(Debug, Default)]
struct OrderedSums {
    index: HashMap<String, usize>,
    entries: Vec<(String, f64)>,
}

impl OrderedSums {
    fn add(&mut self, key: &str, value: f64) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += value,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), value));
            }
        }
    }

    fn into_entries(self) -> Vec<(String, f64)> {
        self.entries
    }
}

/// Counters of record fields excluded from an aggregate
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SkippedFields {
    pub bad_date: u64,
    pub bad_amount: u64,
    pub bad_quantity: u64,
    pub missing_product: u64,
}

impl SkippedFields {
    pub fn total(&self) -> u64 {
        self.bad_date + self.bad_amount + self.bad_quantity + self.missing_product
    }
}

/// Short month label for a record date, `None` if the date does not parse
pub fn month_label(record: &SalesRecord) -> Option<&'static str> {
    record
        .sale_date()
        .map(|d| MONTH_LABELS[d.month0() as usize])
}

/// `100 * part / whole` rounded to one decimal; 0 when `whole` is 0
pub fn ratio_percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 || !whole.is_finite() {
        return 0.0;
    }
    round1(part / whole * 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Build the dashboard report from a fully loaded set of records.
///
/// Pure projection: no I/O, no state between calls. Malformed fields only drop
/// the record out of the aggregate that needs that field:
/// - unparseable `date`: left out of the monthly series
/// - non-finite `total_amount`: left out of every revenue sum
/// - non-finite or negative `quantity`, blank `product`: left out of top products
///
/// A blank category or payment status is bucketed as "Uncategorized" / "Unknown".
pub fn summarize(records: &[SalesRecord]) -> ReportSummary {
    summarize_with_skips(records).0
}

/// Same as [`summarize`], also returning what was skipped
pub fn summarize_with_skips(records: &[SalesRecord]) -> (ReportSummary, SkippedFields) {
    let mut skipped = SkippedFields::default();

    if records.is_empty() {
        return (ReportSummary::default(), skipped);
    }

    let mut by_month = OrderedSums::default();
    let mut by_category = OrderedSums::default();
    let mut by_product = OrderedSums::default();
    let mut by_status = OrderedSums::default();

    let mut total_revenue = 0.0;
    let mut pending_payment_count = 0u64;

    for record in records {
        let amount = record.total_amount.is_finite().then_some(record.total_amount);
        if amount.is_none() {
            skipped.bad_amount += 1;
        }

        if let Some(amount) = amount {
            total_revenue += amount;

            match month_label(record) {
                Some(month) => by_month.add(month, amount),
                None => skipped.bad_date += 1,
            }

            let category = non_blank(&record.revenue_category).unwrap_or(UNCATEGORIZED);
            by_category.add(category, amount);
        } else if month_label(record).is_none() {
            skipped.bad_date += 1;
        }

        match record.product.as_deref().and_then(non_blank) {
            Some(product) if record.quantity.is_finite() && record.quantity >= 0.0 => {
                by_product.add(product, record.quantity);
            }
            Some(_) => skipped.bad_quantity += 1,
            None => skipped.missing_product += 1,
        }

        let status = non_blank(&record.payment_status).unwrap_or(UNKNOWN_STATUS);
        by_status.add(status, 1.0);

        if record.is_payment_pending() {
            pending_payment_count += 1;
        }
    }

    let total_orders = records.len() as u64;

    let monthly_series = by_month
        .into_entries()
        .into_iter()
        .map(|(month, revenue)| MonthlyRevenue { month, revenue })
        .collect();

    let category_breakdown = by_category
        .into_entries()
        .into_iter()
        .map(|(category, revenue)| CategoryShare {
            percentage: ratio_percent(revenue, total_revenue),
            category,
            revenue,
        })
        .collect();

    // sort_by is stable: equal quantities keep first-seen order
    let mut products = by_product.into_entries();
    products.sort_by(|(_, a), (_, b)| b.total_cmp(a));
    let top_products = products
        .into_iter()
        .take(TOP_PRODUCTS_LIMIT)
        .map(|(product, quantity)| ProductQuantity { product, quantity })
        .collect();

    let payment_breakdown = by_status
        .into_entries()
        .into_iter()
        .map(|(status, count)| PaymentShare {
            percentage: ratio_percent(count, total_orders as f64),
            count: count as u64,
            status,
        })
        .collect();

    let average_order_value = if total_orders > 0 {
        total_revenue / total_orders as f64
    } else {
        0.0
    };

    if skipped.total() > 0 {
        tracing::warn!(
            "Sales report: {} malformed fields excluded over {} records (date={}, amount={}, quantity={}, product={})",
            skipped.total(),
            total_orders,
            skipped.bad_date,
            skipped.bad_amount,
            skipped.bad_quantity,
            skipped.missing_product
        );
    }

    let summary = ReportSummary {
        monthly_series,
        category_breakdown,
        top_products,
        payment_breakdown,
        total_revenue,
        total_orders,
        average_order_value,
        pending_payment_count,
    };

    (summary, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        date: &str,
        category: &str,
        product: Option<&str>,
        quantity: f64,
        status: &str,
        total_amount: f64,
    ) -> SalesRecord {
        SalesRecord {
            id: format!("{}-{}", date, product.unwrap_or("none")),
            invoice_no: "INV".into(),
            status: "Completed".into(),
            date: date.into(),
            term_days: None,
            due_date: None,
            customer: Some("Hospital A".into()),
            product: product.map(str::to_string),
            revenue_category: category.into(),
            revenue_type: None,
            unit: Some("Box".into()),
            quantity,
            unit_price: 0.0,
            discount_amount: 0.0,
            total_amount,
            cash_received: 0.0,
            remaining_balance: 0.0,
            payment_status: status.into(),
            description: None,
            notes: None,
        }
    }

    fn sample() -> Vec<SalesRecord> {
        vec![
            record(
                "2024-01-15",
                "Prescription",
                Some("Amoxicillin"),
                100.0,
                "Paid",
                2422.5,
            ),
            record(
                "2024-01-20",
                "OTC",
                Some("Paracetamol"),
                200.0,
                "Partial",
                2295.0,
            ),
        ]
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary, ReportSummary::default());
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.average_order_value, 0.0);
        assert_eq!(summary.pending_payment_count, 0);
        assert!(summary.monthly_series.is_empty());
        assert!(summary.category_breakdown.is_empty());
        assert!(summary.top_products.is_empty());
        assert!(summary.payment_breakdown.is_empty());
    }

    #[test]
    fn test_sample_scenario() {
        let summary = summarize(&sample());

        assert_eq!(summary.total_revenue, 4717.5);
        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.average_order_value, 2358.75);
        assert_eq!(summary.pending_payment_count, 1);

        assert_eq!(
            summary.top_products,
            vec![
                ProductQuantity {
                    product: "Paracetamol".into(),
                    quantity: 200.0
                },
                ProductQuantity {
                    product: "Amoxicillin".into(),
                    quantity: 100.0
                },
            ]
        );

        let shares: Vec<(&str, f64)> = summary
            .category_breakdown
            .iter()
            .map(|c| (c.category.as_str(), c.percentage))
            .collect();
        // 51.35.. and 48.64.. rounded half-up to one decimal
        assert_eq!(shares, vec![("Prescription", 51.4), ("OTC", 48.6)]);
        for (share, approx) in summary.category_breakdown.iter().zip([51.3, 48.7]) {
            assert!((share.percentage - approx).abs() <= 0.1 + 1e-9);
        }

        assert_eq!(
            summary.monthly_series,
            vec![MonthlyRevenue {
                month: "Jan".into(),
                revenue: 4717.5
            }]
        );

        let payments: Vec<(&str, u64, f64)> = summary
            .payment_breakdown
            .iter()
            .map(|p| (p.status.as_str(), p.count, p.percentage))
            .collect();
        assert_eq!(payments, vec![("Paid", 1, 50.0), ("Partial", 1, 50.0)]);
    }

    #[test]
    fn test_zero_amount_gives_zero_average() {
        let records = vec![record("2024-05-01", "OTC", Some("Aspirin"), 3.0, "Paid", 0.0)];
        let summary = summarize(&records);
        assert_eq!(summary.total_orders, 1);
        assert_eq!(summary.average_order_value, 0.0);
        assert_eq!(summary.category_breakdown[0].percentage, 0.0);
        assert!(summary.category_breakdown[0].percentage.is_finite());
    }

    #[test]
    fn test_category_percentages_sum_to_hundred() {
        let records = vec![
            record("2024-01-01", "A", Some("p1"), 1.0, "Paid", 10.0),
            record("2024-01-02", "B", Some("p2"), 1.0, "Paid", 20.0),
            record("2024-02-03", "C", Some("p3"), 1.0, "Paid", 30.0),
            record("2024-03-04", "A", Some("p4"), 1.0, "Paid", 7.0),
        ];
        let summary = summarize(&records);
        let sum: f64 = summary.category_breakdown.iter().map(|c| c.percentage).sum();
        assert!((sum - 100.0).abs() <= 0.1 * summary.category_breakdown.len() as f64);
    }

    #[test]
    fn test_top_products_limited_and_stable() {
        let records = vec![
            record("2024-01-01", "OTC", Some("A"), 10.0, "Paid", 1.0),
            record("2024-01-01", "OTC", Some("B"), 30.0, "Paid", 1.0),
            record("2024-01-01", "OTC", Some("C"), 10.0, "Paid", 1.0),
            record("2024-01-01", "OTC", Some("D"), 5.0, "Paid", 1.0),
            record("2024-01-01", "OTC", Some("E"), 10.0, "Paid", 1.0),
            record("2024-01-01", "OTC", Some("F"), 1.0, "Paid", 1.0),
            record("2024-01-01", "OTC", Some("G"), 2.0, "Paid", 1.0),
            record("2024-01-01", "OTC", Some("A"), 0.0, "Paid", 1.0),
        ];
        let summary = summarize(&records);
        let names: Vec<&str> = summary
            .top_products
            .iter()
            .map(|p| p.product.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A", "C", "E", "D"]);
    }

    #[test]
    fn test_top_products_shorter_than_limit() {
        let summary = summarize(&sample());
        assert_eq!(summary.top_products.len(), 2);
    }

    #[test]
    fn test_pending_count_and_total_orders() {
        let records = vec![
            record("2024-01-01", "OTC", Some("A"), 1.0, "Pending", 1.0),
            record("2024-01-01", "OTC", Some("A"), 1.0, "Partial", 1.0),
            record("2024-01-01", "OTC", Some("A"), 1.0, "Paid", 1.0),
            record("2024-01-01", "OTC", Some("A"), 1.0, "Overdue", 1.0),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.total_orders, 4);
        assert_eq!(summary.pending_payment_count, 2);
    }

    #[test]
    fn test_monthly_series_keeps_first_appearance_order() {
        let records = vec![
            record("2024-03-10", "OTC", Some("A"), 1.0, "Paid", 5.0),
            record("2024-01-10", "OTC", Some("A"), 1.0, "Paid", 1.0),
            record("2024-03-11", "OTC", Some("A"), 1.0, "Paid", 2.0),
            record("2023-12-31T23:00:00Z", "OTC", Some("A"), 1.0, "Paid", 4.0),
        ];
        let summary = summarize(&records);
        let months: Vec<(&str, f64)> = summary
            .monthly_series
            .iter()
            .map(|m| (m.month.as_str(), m.revenue))
            .collect();
        assert_eq!(months, vec![("Mar", 7.0), ("Jan", 1.0), ("Dec", 4.0)]);
    }

    #[test]
    fn test_bad_date_only_drops_monthly_contribution() {
        let records = vec![
            record("not-a-date", "OTC", Some("A"), 4.0, "Pending", 10.0),
            record("2024-02-01", "OTC", Some("A"), 1.0, "Paid", 5.0),
        ];
        let (summary, skipped) = summarize_with_skips(&records);
        assert_eq!(skipped.bad_date, 1);
        assert_eq!(summary.monthly_series.len(), 1);
        assert_eq!(summary.monthly_series[0].revenue, 5.0);
        assert_eq!(summary.total_revenue, 15.0);
        assert_eq!(summary.category_breakdown[0].revenue, 15.0);
        assert_eq!(summary.top_products[0].quantity, 5.0);
        assert_eq!(summary.pending_payment_count, 1);
    }

    #[test]
    fn test_non_finite_amount_and_quantity_are_skipped() {
        let records = vec![
            record("2024-02-01", "OTC", Some("A"), f64::NAN, "Paid", f64::INFINITY),
            record("2024-02-02", "OTC", Some("B"), 2.0, "Paid", 8.0),
            record("2024-02-03", "OTC", None, 9.0, "Paid", 2.0),
        ];
        let (summary, skipped) = summarize_with_skips(&records);
        assert_eq!(skipped.bad_amount, 1);
        assert_eq!(skipped.bad_quantity, 1);
        assert_eq!(skipped.missing_product, 1);
        assert_eq!(summary.total_revenue, 10.0);
        assert_eq!(summary.total_orders, 3);
        assert_eq!(summary.average_order_value, 10.0 / 3.0);
        assert_eq!(summary.top_products.len(), 1);
        assert_eq!(summary.top_products[0].product, "B");
        assert!(summary.category_breakdown.iter().all(|c| c.percentage.is_finite()));
    }

    #[test]
    fn test_blank_category_and_status_are_bucketed() {
        let records = vec![record("2024-02-01", " ", Some("A"), 1.0, "", 3.0)];
        let summary = summarize(&records);
        assert_eq!(summary.category_breakdown[0].category, "Uncategorized");
        assert_eq!(summary.payment_breakdown[0].status, "Unknown");
        assert_eq!(summary.payment_breakdown[0].percentage, 100.0);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let records = sample();
        assert_eq!(summarize(&records), summarize(&records));
    }

    #[test]
    fn test_ratio_percent_guards_zero() {
        assert_eq!(ratio_percent(5.0, 0.0), 0.0);
        assert_eq!(ratio_percent(0.0, 0.0), 0.0);
        assert_eq!(ratio_percent(1.0, 3.0), 33.3);
        assert_eq!(ratio_percent(2.0, 3.0), 66.7);
    }

    #[test]
    fn test_month_labels_cover_calendar() {
        let r = record("2024-12-05", "OTC", None, 0.0, "Paid", 0.0);
        assert_eq!(month_label(&r), Some("Dec"));
        let r = record("2024-06-05", "OTC", None, 0.0, "Paid", 0.0);
        assert_eq!(month_label(&r), Some("Jun"));
    }
}
