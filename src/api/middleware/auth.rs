//! API-key authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Authenticates requests by exact match against the configured API key.
///
/// The key is read from the `x-api-key` header first, then from the
/// `api_key` query parameter. The check runs before any store access and
/// short-circuits the request on failure.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the key is missing or does not match.
pub async fn layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let provided = req
        .headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .or_else(|| query_param(req.uri().query(), "api_key"));

    match provided {
        Some(key) if key == state.api_key => Ok(next.run(req).await),
        _ => Err(AppError::unauthorized(
            "Unauthorized",
            json!({"reason": "API key is missing or invalid"}),
        )),
    }
}

/// Extracts a single query parameter from a raw query string.
fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
