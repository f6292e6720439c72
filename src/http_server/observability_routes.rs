//! Observability HTTP Routes
//!
//! Health check plus the request logging middleware.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::record_routes::RecordState;
use crate::observability::{Event, Logger, Severity};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
    pub version: String,
}

/// Health check route
pub fn health_routes(state: Arc<RecordState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<RecordState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        backend: state.store.backend().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Log one line per request: method, path, status, elapsed time and request id
pub async fn log_requests(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis().to_string();

    Logger::log(
        status_severity(status),
        Event::HttpRequest.as_str(),
        &[
            ("elapsed_ms", elapsed_ms.as_str()),
            ("method", method.as_str()),
            ("path", path.as_str()),
            ("request_id", request_id.as_str()),
            ("status", status.as_str()),
        ],
    );

    response
}

/// 5xx is an error, 4xx a warning
fn status_severity(status: StatusCode) -> Severity {
    if status.is_server_error() {
        Severity::Error
    } else if status.is_client_error() {
        Severity::Warn
    } else {
        Severity::Info
    }
}
