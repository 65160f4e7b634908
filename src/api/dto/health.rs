//! DTO for the health check endpoint.

use serde::Serialize;

/// Health check response.
///
/// `details` carries the failure description when the store is unreachable
/// and is omitted entirely when the service is healthy.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
