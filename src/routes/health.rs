// src/routes/health.rs
//! Liveness endpoint for the prediction service.
//!
//! Defines the `/health` route used by container orchestrators and CI
//! pipelines to confirm the service answers HTTP requests. Following the
//! gateway layout, this file owns the handler and its response type and
//! exports only a subrouter to `mod.rs`.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Handle `GET /health`.
///
/// Returns a static JSON object. It does not call either model, so a healthy
/// response says nothing about model availability.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Create a subrouter containing the `/health` route.
///
/// Generic over the application state so it merges cleanly with the gateway
/// router regardless of the state type.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
