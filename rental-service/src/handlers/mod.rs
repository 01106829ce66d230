//! HTTP handlers for rental-service.

pub mod bills;
pub mod dashboard;
pub mod expenses;
pub mod notes;
pub mod readings;
pub mod tenants;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::services::get_metrics;

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "rental-service"
    }))
}

/// Prometheus metrics endpoint.
pub async fn metrics() -> impl IntoResponse {
    (StatusCode::OK, get_metrics())
}
