//! HTTP request handlers for the quotation API.
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Map, Value};

use quotation_common::{QuotationDraft, QuotationRecord};

use crate::error::ApiError;
use crate::store::QuotationStore;

/// `GET /bar-service-quotations` — the full quotation list.
pub async fn list_quotations(
    State(store): State<QuotationStore>,
) -> Result<Json<Vec<QuotationRecord>>, ApiError> {
    Ok(Json(store.list().await?))
}

/// `POST /bar-service-quotations` — store a new quotation.
pub async fn create_quotation(
    State(store): State<QuotationStore>,
    Json(draft): Json<QuotationDraft>,
) -> Result<(StatusCode, Json<QuotationRecord>), ApiError> {
    let record = store.insert(draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `PUT /bar-service-quotations/:id` — shallow-merge fields into a record.
pub async fn update_quotation(
    State(store): State<QuotationStore>,
    Path(id): Path<String>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<QuotationRecord>, ApiError> {
    Ok(Json(store.update(&id, fields).await?))
}

/// `DELETE /bar-service-quotations/:id` — remove a record.
pub async fn delete_quotation(
    State(store): State<QuotationStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    store.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /test` — liveness probe.
pub async fn test_handler() -> Json<Value> {
    Json(json!({"message": "Server is running!"}))
}
