//! DTOs for the retrieval endpoint.

use serde::{Deserialize, Serialize};

/// Query parameters for the retrieval endpoint.
#[derive(Debug, Deserialize)]
pub struct RetrieveQuery {
    pub our_param: Option<String>,
}

/// The recovered parameter tuple plus its stored timestamp, verbatim.
#[derive(Debug, Serialize)]
pub struct OriginalResponse {
    pub keyword: String,
    pub src: String,
    pub creative: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
