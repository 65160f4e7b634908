//! Parameter-to-token mapping engine.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use tracing::{debug, info};

use crate::domain::mapping::{ForwardRecord, MappingParams, ReverseRecord, reverse_key};
use crate::domain::store::{MappingStore, StoreError};
use crate::utils::token::generate_token;

/// Errors raised while resolving or retrieving mappings.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no reverse mapping for token")]
    NotFound,
    #[error("stored payload is not valid JSON: {0}")]
    CorruptPayload(#[source] serde_json::Error),
}

/// Outcome of [`MappingService::resolve_or_create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMapping {
    pub token: String,
    pub created_at: String,
}

/// Outcome of [`MappingService::retrieve`]: the original tuple plus the
/// stored timestamp, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedMapping {
    pub keyword: String,
    pub src: String,
    pub creative: String,
    pub created_at: Option<String>,
}

/// Owns the forward/reverse mapping pair: key construction, token generation,
/// the reuse-vs-refresh decision, and the dual write.
///
/// The two writes of a generation event are issued sequentially (forward
/// first) and are not transactional. A crash between them leaves an orphaned
/// forward entry: the redirect keeps working, retrieval of that token returns
/// not-found until the next refresh. Concurrent identical requests racing
/// through the create path both write; the store's last-write-wins semantics
/// pick the surviving forward record, and every reverse record written stays
/// independently retrievable.
pub struct MappingService {
    store: Arc<dyn MappingStore>,
    /// TTL applied to both records of a new mapping event, when configured.
    /// `None` means records never expire.
    ttl_seconds: Option<u64>,
}

impl MappingService {
    /// Creates a new mapping service over the given store.
    pub fn new(store: Arc<dyn MappingStore>, ttl_seconds: Option<u64>) -> Self {
        Self { store, ttl_seconds }
    }

    /// Resolves the token for a parameter tuple, generating one if needed.
    ///
    /// # Reuse
    ///
    /// When a valid forward record exists and `force_refresh` is false, its
    /// token and timestamp are returned unchanged and no store write occurs.
    ///
    /// # Refresh
    ///
    /// With `force_refresh` (or no usable record), a fresh token is generated,
    /// one timestamp is captured, and both the forward and reverse records are
    /// written with that same timestamp. A refresh overwrites the forward
    /// record; the previous reverse record is left in place, orphaned but
    /// still retrievable.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Store`] when any store operation fails.
    pub async fn resolve_or_create(
        &self,
        params: &MappingParams,
        force_refresh: bool,
    ) -> Result<ResolvedMapping, MappingError> {
        let composite_key = params.composite_key();
        let fields = self.store.get(&composite_key).await?;

        if !force_refresh
            && let Some(existing) = ForwardRecord::from_fields(&fields)
        {
            debug!(%composite_key, token = %existing.our_param, "using existing mapping");
            return Ok(ResolvedMapping {
                token: existing.our_param,
                created_at: existing.created_at,
            });
        }

        let token = generate_token();
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        let forward = ForwardRecord {
            our_param: token.clone(),
            created_at: created_at.clone(),
        };
        let reverse = ReverseRecord {
            payload: params.to_payload(),
            created_at: Some(created_at.clone()),
        };

        // Forward first. A crash between the two writes leaves the token
        // redirectable but not retrievable until the next refresh.
        self.store.set(&composite_key, forward.to_fields()).await?;

        let rev_key = reverse_key(&token);
        self.store.set(&rev_key, reverse.to_fields()).await?;

        if let Some(ttl) = self.ttl_seconds {
            self.store.expire(&composite_key, ttl).await?;
            self.store.expire(&rev_key, ttl).await?;
        }

        info!(%composite_key, %token, %created_at, "generated new mapping");

        Ok(ResolvedMapping { token, created_at })
    }

    /// Recovers the original parameter tuple for a token.
    ///
    /// # Errors
    ///
    /// - [`MappingError::NotFound`] when no reverse record exists or its
    ///   payload field is missing
    /// - [`MappingError::CorruptPayload`] when the stored payload fails to
    ///   deserialize
    /// - [`MappingError::Store`] when the store operation fails
    pub async fn retrieve(&self, token: &str) -> Result<RetrievedMapping, MappingError> {
        let rev_key = reverse_key(token);
        let fields = self.store.get(&rev_key).await?;

        let record = ReverseRecord::from_fields(&fields).ok_or(MappingError::NotFound)?;

        let params: MappingParams =
            serde_json::from_str(&record.payload).map_err(MappingError::CorruptPayload)?;

        Ok(RetrievedMapping {
            keyword: params.keyword,
            src: params.src,
            creative: params.creative,
            created_at: record.created_at,
        })
    }
}
