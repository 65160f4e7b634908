//! Handler for the health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use tracing::error;

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Reports service health by pinging the key-value store.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: `{"status":"ok"}`
/// - **503 Service Unavailable**: `{"status":"error","details":...}`
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    match state.store.ping().await {
        Ok(()) => Ok(Json(HealthResponse {
            status: "ok".to_string(),
            details: None,
        })),
        Err(e) => {
            error!(error = %e, "Health check failed");
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "error".to_string(),
                    details: Some(e.to_string()),
                }),
            ))
        }
    }
}
