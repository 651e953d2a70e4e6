//! HTTP handlers for emergency-service.

pub mod contact;
pub mod qr;
pub mod register;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

use crate::services::get_metrics;
use crate::AppState;

/// Liveness placeholder kept from the original hello-world service.
pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Hello, World" }))
}

/// Health check endpoint for Docker/K8s liveness probes.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": state.config.service_name,
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Readiness check endpoint for K8s readiness probes.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let registered_users = state.directory.len().await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "status": "ready", "registered_users": registered_users })),
    ))
}

/// Prometheus metrics endpoint.
pub async fn metrics() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
