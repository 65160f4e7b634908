//! DTO for the redirect endpoint.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::mapping::MappingParams;

/// Query parameters for the redirect endpoint.
///
/// All three marketing parameters are required and non-empty. Every field is
/// deserialized as optional so that a request missing several of them yields
/// one structured error list naming each, rather than a bare extractor
/// rejection on the first.
#[derive(Debug, Deserialize, Validate)]
pub struct RedirectQuery {
    #[validate(
        required(message = "keyword is required"),
        length(min = 1, message = "keyword is required")
    )]
    pub keyword: Option<String>,

    #[validate(
        required(message = "src is required"),
        length(min = 1, message = "src is required")
    )]
    pub src: Option<String>,

    #[validate(
        required(message = "creative is required"),
        length(min = 1, message = "creative is required")
    )]
    pub creative: Option<String>,

    /// Optional refresh flag; the only accepted value is the literal `"true"`.
    #[validate(custom(function = "validate_refresh"))]
    pub refresh: Option<String>,
}

impl RedirectQuery {
    /// Whether the caller forced token regeneration.
    pub fn force_refresh(&self) -> bool {
        self.refresh.as_deref() == Some("true")
    }

    /// Converts the validated query into the domain parameter tuple.
    ///
    /// Must only be called after [`Validate::validate`] has passed; missing
    /// fields collapse to empty strings otherwise.
    pub fn into_params(self) -> MappingParams {
        MappingParams {
            keyword: self.keyword.unwrap_or_default(),
            src: self.src.unwrap_or_default(),
            creative: self.creative.unwrap_or_default(),
        }
    }
}

fn validate_refresh(value: &str) -> Result<(), ValidationError> {
    if value == "true" {
        Ok(())
    } else {
        let mut error = ValidationError::new("refresh");
        error.message = Some("refresh, if provided, must be 'true'".into());
        Err(error)
    }
}
