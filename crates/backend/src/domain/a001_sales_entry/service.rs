use anyhow::Result;
use contracts::domain::a001_sales_entry::{
    NewSalesEntry, SalesEntryListRequest, SalesEntryListResponse, SalesRecord,
};

use super::ingestion;
use super::repository;
use crate::shared::format::format_currency;

/// Принять новую продажу: рассчитать суммы и сохранить
pub async fn create_entry(entry: &NewSalesEntry) -> Result<SalesRecord> {
    let record = ingestion::resolve_entry(entry)?;
    repository::insert_entry(&record).await?;
    tracing::info!(
        "Sales entry created: id={}, invoice={}, total={}, payment_status={}",
        record.id,
        record.invoice_no,
        format_currency(record.total_amount),
        record.payment_status
    );
    Ok(record)
}

pub async fn get_by_id(id: &str) -> Result<Option<SalesRecord>> {
    repository::get_by_id(id).await
}

/// Returns true if a row was deleted
pub async fn delete_by_id(id: &str) -> Result<bool> {
    let affected = repository::delete_by_id(id).await?;
    Ok(affected > 0)
}

/// Rows for the sales table, newest first
pub async fn list_with_filters(filter: &SalesEntryListRequest) -> Result<SalesEntryListResponse> {
    let limit = filter.effective_limit();
    // One extra row tells whether there is more beyond the limit
    let mut items = repository::list_with_filters(filter, Some(limit + 1)).await?;
    let has_more = items.len() as u64 > limit;
    items.truncate(limit as usize);
    let total_count = if has_more {
        repository::count_with_filters(filter).await?
    } else {
        items.len() as u64
    };

    Ok(SalesEntryListResponse {
        total_count,
        items,
        has_more,
    })
}

/// Entries shipped with the dashboard for demos and first start
pub fn sample_entries() -> Vec<(String, NewSalesEntry)> {
    vec![
        (
            "1".to_string(),
            NewSalesEntry {
                invoice_no: "INV-001".into(),
                date: "2024-01-15".into(),
                customer: "Hospital A".into(),
                product: "Amoxicillin".into(),
                quantity: 100.0,
                unit_price: 25.5,
                revenue_category: "Prescription".into(),
                revenue_type: Some("Direct".into()),
                status: Some("Completed".into()),
                term_days: Some(30),
                unit: Some("Box".into()),
                description: Some("Monthly supply order".into()),
                notes: Some("Delivered on time".into()),
                discount_percent: Some(5.0),
                discount_amount: None,
                cash_received: Some(2422.5),
                payment_status: None,
            },
        ),
        (
            "2".to_string(),
            NewSalesEntry {
                invoice_no: "INV-002".into(),
                date: "2024-01-20".into(),
                customer: "Pharmacy B".into(),
                product: "Paracetamol".into(),
                quantity: 200.0,
                unit_price: 12.75,
                revenue_category: "OTC".into(),
                revenue_type: Some("Wholesale".into()),
                status: Some("Pending".into()),
                term_days: Some(45),
                unit: Some("Box".into()),
                description: Some("Emergency order".into()),
                notes: Some("Partial payment received".into()),
                discount_percent: Some(10.0),
                discount_amount: None,
                cash_received: Some(1000.0),
                payment_status: None,
            },
        ),
    ]
}

pub fn sample_records() -> Vec<SalesRecord> {
    sample_entries()
        .into_iter()
        .filter_map(|(id, entry)| match ingestion::resolve_entry_with_id(&entry, id) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::error!("Sample entry {} rejected: {}", entry.invoice_no, e);
                None
            }
        })
        .collect()
}

/// Insert the sample entries when the table is empty. Returns inserted count.
pub async fn seed_sample_data() -> Result<usize> {
    let existing = repository::count().await?;
    if existing > 0 {
        tracing::info!(
            "Sample data skipped: a001_sales_entry already has {} rows",
            existing
        );
        return Ok(0);
    }

    let records = sample_records();
    for record in &records {
        repository::insert_entry(record).await?;
    }
    tracing::info!("Inserted {} sample sales entries", records.len());
    Ok(records.len())
}
