//! Mapping records and store key construction.
//!
//! A single "mapping event" produces two records in the store:
//!
//! - a **forward** record under `map:{keyword}:{src}:{creative}` holding the
//!   issued token and its creation timestamp
//! - a **reverse** record under `rev:{token}` holding the serialized original
//!   tuple and the same timestamp
//!
//! Records live in the store as dynamic field-maps and are decoded into the
//! typed structs here at the store boundary on read.

use crate::domain::store::StoreFields;
use serde::{Deserialize, Serialize};

const FIELD_OUR_PARAM: &str = "our_param";
const FIELD_CREATED_AT: &str = "created_at";
const FIELD_PAYLOAD: &str = "payload";

/// The caller-supplied marketing parameter tuple.
///
/// Each component is an opaque non-empty string; no further syntax is imposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingParams {
    pub keyword: String,
    pub src: String,
    pub creative: String,
}

impl MappingParams {
    /// Composite natural key for the forward mapping.
    pub fn composite_key(&self) -> String {
        format!("map:{}:{}:{}", self.keyword, self.src, self.creative)
    }

    /// Serializes the tuple into the reverse-record payload.
    pub fn to_payload(&self) -> String {
        serde_json::json!({
            "keyword": self.keyword,
            "src": self.src,
            "creative": self.creative,
        })
        .to_string()
    }
}

/// Store key for the reverse mapping of `token`.
pub fn reverse_key(token: &str) -> String {
    format!("rev:{token}")
}

/// Forward mapping: composite key → issued token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardRecord {
    pub our_param: String,
    pub created_at: String,
}

impl ForwardRecord {
    /// Decodes a forward record from raw store fields.
    ///
    /// A record missing either field (or with an empty token) is treated as
    /// absent, which forces a fresh generation on the next resolve.
    pub fn from_fields(fields: &StoreFields) -> Option<Self> {
        let our_param = fields.get(FIELD_OUR_PARAM).filter(|v| !v.is_empty())?;
        let created_at = fields.get(FIELD_CREATED_AT)?;
        Some(Self {
            our_param: our_param.clone(),
            created_at: created_at.clone(),
        })
    }

    /// Encodes the record into store fields.
    pub fn to_fields(&self) -> Vec<(String, String)> {
        vec![
            (FIELD_OUR_PARAM.to_string(), self.our_param.clone()),
            (FIELD_CREATED_AT.to_string(), self.created_at.clone()),
        ]
    }
}

/// Reverse mapping: token → serialized original tuple.
///
/// Immutable once written. A refresh writes a brand-new reverse record under
/// the new token; the old one is left in place and stays retrievable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseRecord {
    pub payload: String,
    /// Creation timestamp, returned to callers verbatim. Optional because
    /// records written by earlier deployments may not carry it.
    pub created_at: Option<String>,
}

impl ReverseRecord {
    /// Decodes a reverse record from raw store fields.
    ///
    /// Only the payload is required; a record without one is treated as absent.
    pub fn from_fields(fields: &StoreFields) -> Option<Self> {
        let payload = fields.get(FIELD_PAYLOAD).filter(|v| !v.is_empty())?;
        Some(Self {
            payload: payload.clone(),
            created_at: fields.get(FIELD_CREATED_AT).cloned(),
        })
    }

    /// Encodes the record into store fields.
    pub fn to_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![(FIELD_PAYLOAD.to_string(), self.payload.clone())];
        if let Some(created_at) = &self.created_at {
            fields.push((FIELD_CREATED_AT.to_string(), created_at.clone()));
        }
        fields
    }
}
