use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::d100_sales_report::ReportSummary;
use contracts::domain::a001_sales_entry::SalesEntryListRequest;

use crate::dashboards::d100_sales_report::service;
use crate::domain::a001_sales_entry::service::sample_records;
use crate::domain::a001_sales_entry::source::{RecordSource, SqliteRecordSource, StaticRecordSource};
use crate::shared::format::format_currency;

/// GET /api/d100/sales_report?date_from=2024-01-01&payment_status=Paid
pub async fn get_sales_report(
    Query(filter): Query<SalesEntryListRequest>,
) -> Result<Json<ReportSummary>, StatusCode> {
    tracing::info!(
        "D100 Sales report: date_from={:?}, date_to={:?}, category={:?}, payment_status={:?}",
        filter.date_from,
        filter.date_to,
        filter.revenue_category,
        filter.payment_status
    );
    respond(&SqliteRecordSource::new(filter)).await
}

/// GET /api/d100/sales_report/sample
///
/// Same report over the built-in sample entries, without touching the database
pub async fn get_sample_report(
    Query(filter): Query<SalesEntryListRequest>,
) -> Result<Json<ReportSummary>, StatusCode> {
    respond(&StaticRecordSource::new(sample_records()).with_filter(filter)).await
}

async fn respond(source: &dyn RecordSource) -> Result<Json<ReportSummary>, StatusCode> {
    match service::build_report(source).await {
        Ok(report) => {
            tracing::info!(
                "D100 Sales report ({}): {} orders, revenue {}, {} months, {} categories",
                source.source_name(),
                report.total_orders,
                format_currency(report.total_revenue),
                report.monthly_series.len(),
                report.category_breakdown.len()
            );
            Ok(Json(report))
        }
        Err(e) => {
            tracing::error!("D100 Sales report: failed to build report: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
