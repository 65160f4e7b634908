//! Handler for the token retrieval endpoint.

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::json;
use tracing::{error, info, warn};

use crate::api::dto::retrieve::{OriginalResponse, RetrieveQuery};
use crate::application::services::MappingError;
use crate::error::AppError;
use crate::state::AppState;

/// Recovers the original parameter tuple for an issued token.
///
/// # Endpoint
///
/// `GET /retrieve_original?our_param={token}`
///
/// API-key authentication runs in middleware before this handler.
///
/// # Errors
///
/// - 400 when `our_param` is missing
/// - 404 when no reverse mapping exists for the token
/// - 500 with a generic body on store failure or a corrupt stored payload;
///   the cause is logged, never returned to the caller
pub async fn retrieve_original_handler(
    State(state): State<AppState>,
    Query(query): Query<RetrieveQuery>,
) -> Result<Json<OriginalResponse>, AppError> {
    info!(our_param = query.our_param.as_deref(), "Retrieve request received");

    let token = match query.our_param.as_deref() {
        Some(token) if !token.is_empty() => token,
        _ => {
            return Err(AppError::bad_request("our_param is required", json!({})));
        }
    };

    match state.mappings.retrieve(token).await {
        Ok(mapping) => {
            info!(
                our_param = token,
                keyword = %mapping.keyword,
                "Successfully retrieved mapping"
            );
            Ok(Json(OriginalResponse {
                keyword: mapping.keyword,
                src: mapping.src,
                creative: mapping.creative,
                created_at: mapping.created_at,
            }))
        }
        Err(MappingError::NotFound) => {
            warn!(our_param = token, "Mapping not found");
            Err(AppError::not_found(
                "Mapping not found",
                json!({ "our_param": token }),
            ))
        }
        Err(MappingError::CorruptPayload(e)) => {
            error!(our_param = token, error = %e, "Error parsing stored payload");
            Err(AppError::internal("Internal server error", json!({})))
        }
        Err(MappingError::Store(e)) => {
            error!(our_param = token, error = %e, "Error fetching reverse mapping");
            Err(AppError::internal("Internal server error", json!({})))
        }
    }
}
