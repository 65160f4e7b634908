//! Router configuration.
//!
//! # Route Structure
//!
//! - `GET /`                  - parameter redirect (public)
//! - `GET /health`            - store liveness check (public)
//! - `GET /retrieve_original` - token-to-tuple lookup (API key required)
//!
//! # Middleware
//!
//! - **Tracing** - structured request/response logging
//! - **Authentication** - API key via `x-api-key` header or `api_key` query
//! - **Panic safety net** - uncaught panics in request handling become a
//!   generic 500 instead of tearing down the connection

use crate::api::handlers::{health_handler, redirect_handler, retrieve_original_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower_http::catch_panic::CatchPanicLayer;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/retrieve_original", get(retrieve_original_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/", get(redirect_handler))
        .route("/health", get(health_handler))
        .merge(protected)
        .with_state(state)
        .layer(tracing::layer())
        .layer(CatchPanicLayer::new())
}
