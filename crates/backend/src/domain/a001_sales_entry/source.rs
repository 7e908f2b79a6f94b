use anyhow::Result;
use async_trait::async_trait;
use contracts::domain::a001_sales_entry::{SalesEntryListRequest, SalesRecord};

use super::repository;

/// Источник записей о продажах для отчётов
///
/// Returns a fully materialized list; reports are never built from a partial one.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_records(&self) -> Result<Vec<SalesRecord>>;

    fn source_name(&self) -> &str;
}

/// Records stored in the a001_sales_entry table, narrowed by the table filters
#[derive(Debug, Clone, Default)]
pub struct SqliteRecordSource {
    pub filter: SalesEntryListRequest,
}

impl SqliteRecordSource {
    pub fn new(filter: SalesEntryListRequest) -> Self {
        Self { filter }
    }
}

#[async_trait]
impl RecordSource for SqliteRecordSource {
    async fn fetch_records(&self) -> Result<Vec<SalesRecord>> {
        // The report covers every match; the limit only applies to the table view
        repository::list_with_filters(&self.filter, None).await
    }

    fn source_name(&self) -> &str {
        "sqlite"
    }
}

/// Fixed in-memory record set
#[derive(Debug, Clone, Default)]
pub struct StaticRecordSource {
    records: Vec<SalesRecord>,
    filter: SalesEntryListRequest,
}

impl StaticRecordSource {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self {
            records,
            filter: SalesEntryListRequest::default(),
        }
    }

    pub fn with_filter(mut self, filter: SalesEntryListRequest) -> Self {
        self.filter = filter;
        self
    }
}

#[async_trait]
impl RecordSource for StaticRecordSource {
    async fn fetch_records(&self) -> Result<Vec<SalesRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| self.filter.matches(r))
            .cloned()
            .collect())
    }

    fn source_name(&self) -> &str {
        "static"
    }
}
