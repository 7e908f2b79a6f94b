use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a001_sales_entry::{
    NewSalesEntry, SalesEntryListRequest, SalesEntryListResponse, SalesRecord,
};
use serde_json::{json, Value};

use crate::domain::a001_sales_entry::ingestion::SalesEntryError;
use crate::domain::a001_sales_entry::service;
use crate::shared::format::format_number;

type ErrorResponse = (StatusCode, Json<Value>);

fn error_response(status: StatusCode, message: String) -> ErrorResponse {
    (status, Json(json!({ "error": message })))
}

/// GET /api/sales_entry?date_from=2024-01-01&customer=hospital&limit=100
pub async fn list(
    Query(filter): Query<SalesEntryListRequest>,
) -> Result<Json<SalesEntryListResponse>, StatusCode> {
    match service::list_with_filters(&filter).await {
        Ok(response) => {
            tracing::info!(
                "A001 Sales entry list: {} rows of {} matching, has_more={}",
                format_number(response.items.len()),
                response.total_count,
                response.has_more
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!("Failed to list sales entries: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/sales_entry
pub async fn create(
    Json(entry): Json<NewSalesEntry>,
) -> Result<(StatusCode, Json<SalesRecord>), ErrorResponse> {
    match service::create_entry(&entry).await {
        Ok(record) => Ok((StatusCode::CREATED, Json(record))),
        Err(e) => match e.downcast_ref::<SalesEntryError>() {
            Some(rejected) => {
                tracing::warn!(
                    "Sales entry {} rejected: {}",
                    entry.invoice_no,
                    rejected
                );
                Err(error_response(StatusCode::BAD_REQUEST, rejected.to_string()))
            }
            None => {
                tracing::error!("Failed to create sales entry {}: {}", entry.invoice_no, e);
                Err(error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to store sales entry".to_string(),
                ))
            }
        },
    }
}

/// GET /api/sales_entry/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<SalesRecord>, StatusCode> {
    match service::get_by_id(&id).await {
        Ok(Some(record)) => Ok(Json(record)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to get sales entry {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /api/sales_entry/:id
pub async fn delete(Path(id): Path<String>) -> StatusCode {
    match service::delete_by_id(&id).await {
        Ok(true) => {
            tracing::info!("Sales entry deleted: id={}", id);
            StatusCode::NO_CONTENT
        }
        Ok(false) => StatusCode::NOT_FOUND,
        Err(e) => {
            tracing::error!("Failed to delete sales entry {}: {}", id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
