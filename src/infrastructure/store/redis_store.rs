//! Redis-backed mapping store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{error, info};

use crate::domain::store::{MappingStore, StoreError, StoreFields, StoreResult};

/// Redis implementation of the mapping store.
///
/// Uses `ConnectionManager` for connection reuse and automatic reconnection.
/// The manager is process-wide shared state: opened once at startup, cloned
/// per operation, and released during ordered shutdown after the HTTP
/// listener has drained.
///
/// Unlike a cache, every error here propagates to the caller: the store is
/// the single source of truth and a failed operation must surface as a 5xx.
pub struct RedisStore {
    client: ConnectionManager,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> StoreResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let store = Self { client: manager };
        store.ping().await?;

        info!("Connected to Redis");

        Ok(store)
    }
}

#[async_trait]
impl MappingStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<StoreFields> {
        let mut conn = self.client.clone();

        conn.hgetall::<_, StoreFields>(key).await.map_err(|e| {
            error!(%key, "Redis HGETALL error: {}", e);
            StoreError::Operation(e.to_string())
        })
    }

    async fn set(&self, key: &str, fields: Vec<(String, String)>) -> StoreResult<()> {
        let mut conn = self.client.clone();

        conn.hset_multiple::<_, _, _, ()>(key, &fields)
            .await
            .map_err(|e| {
                error!(%key, "Redis HSET error: {}", e);
                StoreError::Operation(e.to_string())
            })
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> StoreResult<bool> {
        let mut conn = self.client.clone();

        conn.expire::<_, bool>(key, ttl_seconds as i64)
            .await
            .map_err(|e| {
                error!(%key, "Redis EXPIRE error: {}", e);
                StoreError::Operation(e.to_string())
            })
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.client.clone();

        let pong: String = conn
            .ping()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        if pong != "PONG" {
            return Err(StoreError::Connection(format!(
                "Redis did not respond with PONG: {}",
                pong
            )));
        }

        Ok(())
    }

    async fn flush_all(&self) -> StoreResult<()> {
        let mut conn = self.client.clone();

        redis::cmd("FLUSHALL")
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| {
                error!("Redis FLUSHALL error: {}", e);
                StoreError::Operation(e.to_string())
            })
    }

    async fn close(&self) {
        // ConnectionManager has no explicit quit; dropping the last clone
        // tears the connection down.
        info!("Releasing Redis connection");
    }
}
