//! Handler for the affiliate redirect endpoint.

use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::{error, info};
use validator::Validate;

use crate::api::dto::redirect::RedirectQuery;
use crate::error::AppError;
use crate::state::AppState;

/// Issues a token for the marketing parameter tuple and redirects to the
/// affiliate URL carrying it.
///
/// # Endpoint
///
/// `GET /?keyword=...&src=...&creative=...[&refresh=true]`
///
/// # Request Flow
///
/// 1. Validate the query (all three parameters required and non-empty;
///    `refresh`, if present, must be the literal `"true"`)
/// 2. Resolve or create the mapping: an existing token is reused unchanged,
///    unless `refresh=true` forces regeneration
/// 3. Respond `302 Found` with `Location: {AFFILIATE_BASE_URL}?our_param={token}`
///
/// A request writes either zero store records (reuse) or two (forward plus
/// reverse mapping).
///
/// # Errors
///
/// Returns 400 with a structured error list on validation failure, 500 with a
/// generic body when the store is unreachable.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Query(query): Query<RedirectQuery>,
) -> Result<impl IntoResponse, AppError> {
    info!(
        keyword = query.keyword.as_deref(),
        src = query.src.as_deref(),
        creative = query.creative.as_deref(),
        refresh = query.refresh.as_deref(),
        "Redirect request received"
    );

    query.validate()?;

    let force_refresh = query.force_refresh();
    let params = query.into_params();

    let resolved = state
        .mappings
        .resolve_or_create(&params, force_refresh)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to resolve mapping");
            AppError::internal("Internal server error", json!({}))
        })?;

    let location = format!("{}?our_param={}", state.affiliate_base_url, resolved.token);

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}
