//! Record HTTP Routes
//!
//! One endpoint per store operation:
//!
//! - `GET /select_all`
//! - `GET /select_one/:id`
//! - `POST /insert`
//! - `PUT /update/:id`
//! - `DELETE /delete/:id`
//! - `POST /export`

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::errors::{ApiError, ApiResult};
use crate::observability::{log_event_with_fields, Event};
use crate::store::{NewRecord, Record, RecordPatch, RecordStore};

// ==================
// Shared State
// ==================

/// Record state shared across handlers
#[derive(Debug, Clone)]
pub struct RecordState {
    pub store: Arc<dyn RecordStore>,
}

impl RecordState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResponse {
    pub message: String,
    pub deleted_object: Record,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

pub const DELETED_MESSAGE: &str = "Object deleted successfully";
pub const EXPORTED_MESSAGE: &str = "Data exported to JSON successfully";

// ==================
// Record Routes
// ==================

/// Create record routes
pub fn record_routes(state: Arc<RecordState>) -> Router {
    Router::new()
        .route("/select_all", get(select_all_handler))
        .route("/select_one/:id", get(select_one_handler))
        .route("/insert", post(insert_handler))
        .route("/update/:id", put(update_handler))
        .route("/delete/:id", delete(delete_handler))
        .route("/export", post(export_handler))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Ids that do not parse as integers cannot name a record
fn record_id(path: Result<Path<i64>, PathRejection>) -> ApiResult<i64> {
    path.map(|Path(id)| id).map_err(|_| ApiError::UnknownId)
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))
}

// ==================
// Handlers
// ==================

async fn select_all_handler(State(state): State<Arc<RecordState>>) -> ApiResult<Json<Vec<Record>>> {
    Ok(Json(state.store.list()?))
}

async fn select_one_handler(
    State(state): State<Arc<RecordState>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Record>> {
    let id = record_id(path)?;
    Ok(Json(state.store.get(id)?))
}

async fn insert_handler(
    State(state): State<Arc<RecordState>>,
    body: Result<Json<NewRecord>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Record>)> {
    let new = json_body(body)?;
    let record = state.store.create(new)?;

    log_event_with_fields(Event::RecordCreated, &[("id", record.id.to_string().as_str())]);

    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_handler(
    State(state): State<Arc<RecordState>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<RecordPatch>, JsonRejection>,
) -> ApiResult<Json<Record>> {
    let id = record_id(path)?;
    let patch = json_body(body)?;
    let record = state.store.update(id, patch)?;

    log_event_with_fields(Event::RecordUpdated, &[("id", record.id.to_string().as_str())]);

    Ok(Json(record))
}

async fn delete_handler(
    State(state): State<Arc<RecordState>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    let id = record_id(path)?;
    let record = state.store.delete(id)?;

    log_event_with_fields(Event::RecordDeleted, &[("id", record.id.to_string().as_str())]);

    Ok(Json(DeleteResponse {
        message: DELETED_MESSAGE.to_string(),
        deleted_object: record,
    }))
}

async fn export_handler(State(state): State<Arc<RecordState>>) -> ApiResult<Json<MessageResponse>> {
    let summary = state.store.export()?;

    log_event_with_fields(
        Event::StoreExported,
        &[
            ("path", summary.path.display().to_string().as_str()),
            ("records", summary.records.to_string().as_str()),
        ],
    );

    Ok(Json(MessageResponse {
        message: EXPORTED_MESSAGE.to_string(),
    }))
}
