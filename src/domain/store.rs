//! Key-value store contract for mapping records.

use async_trait::async_trait;
use std::collections::HashMap;

/// Field-map stored under a single key, as returned by a Redis `HGETALL`.
pub type StoreFields = HashMap<String, String>;

/// Errors raised by store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),
    #[error("store operation failed: {0}")]
    Operation(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Contract over the remote hash-map store holding forward and reverse mappings.
///
/// The store is the single source of truth for the service, so unlike a cache
/// every error propagates to the caller; no operation is fail-open.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis-backed store
/// - [`crate::infrastructure::store::InMemoryStore`] - in-process store for tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Fetches all fields stored under `key`.
    ///
    /// Returns an empty map when the key does not exist, mirroring `HGETALL`.
    async fn get(&self, key: &str) -> StoreResult<StoreFields>;

    /// Writes the given fields under `key`, overwriting existing values.
    async fn set(&self, key: &str, fields: Vec<(String, String)>) -> StoreResult<()>;

    /// Sets a time-to-live on `key`.
    ///
    /// Returns `true` when the key existed and the TTL was applied.
    async fn expire(&self, key: &str, ttl_seconds: u64) -> StoreResult<bool>;

    /// Liveness probe against the store.
    async fn ping(&self) -> StoreResult<()>;

    /// Removes every key in the store. Test-only helper.
    async fn flush_all(&self) -> StoreResult<()>;

    /// Releases the store connection. Called once during shutdown, after the
    /// HTTP listener has drained.
    async fn close(&self);
}
