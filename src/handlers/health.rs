use axum::{extract::State, Json};
use tracing::debug;

use crate::models::HealthResponse;
use crate::state::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    debug!("Health check requested");
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Server is running".to_string(),
    })
}

/// Readiness check endpoint. All state is in memory, so a running process
/// that can reach its store is ready.
pub async fn ready_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let documents = state.store.len();
    debug!("Readiness check requested ({} documents)", documents);
    Json(HealthResponse {
        status: "ok".to_string(),
        message: format!("{} ready with {} documents", state.service_name, documents),
    })
}
