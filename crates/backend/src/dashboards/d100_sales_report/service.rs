use anyhow::Result;
use contracts::dashboards::d100_sales_report::ReportSummary;

use super::aggregation;
use crate::domain::a001_sales_entry::source::RecordSource;

/// Get sales report data
///
/// Loads the complete record set from the source, then summarizes it. A failed
/// fetch is logged and returned to the caller; no report is built from partial data.
pub async fn build_report(source: &dyn RecordSource) -> Result<ReportSummary> {
    let records = match source.fetch_records().await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(
                "D100 Sales report: failed to fetch records from {}: {}",
                source.source_name(),
                e
            );
            return Err(e);
        }
    };

    let summary = aggregation::summarize(&records);
    tracing::debug!(
        "D100 Sales report: {} records from {} summarized",
        records.len(),
        source.source_name()
    );

    Ok(summary)
}
