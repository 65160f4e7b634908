//! In-process mapping store for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::store::{MappingStore, StoreError, StoreFields, StoreResult};

/// Hash-map store held in process memory.
///
/// Behaves like a single-node Redis for the operations the service uses,
/// except that TTLs are recorded but never enforced. Used by the integration
/// tests and as a stand-in when no Redis is available.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<HashMap<String, StoreFields>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<String, StoreFields>>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Operation("store mutex poisoned".to_string()))
    }
}

#[async_trait]
impl MappingStore for InMemoryStore {
    async fn get(&self, key: &str) -> StoreResult<StoreFields> {
        Ok(self.lock()?.get(key).cloned().unwrap_or_default())
    }

    async fn set(&self, key: &str, fields: Vec<(String, String)>) -> StoreResult<()> {
        let mut map = self.lock()?;
        let entry = map.entry(key.to_string()).or_default();
        for (field, value) in fields {
            entry.insert(field, value);
        }
        Ok(())
    }

    async fn expire(&self, key: &str, _ttl_seconds: u64) -> StoreResult<bool> {
        Ok(self.lock()?.contains_key(key))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn flush_all(&self) -> StoreResult<()> {
        self.lock()?.clear();
        Ok(())
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key_returns_empty_map() {
        let store = InMemoryStore::new();
        assert!(store.get("map:a:b:c").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_merges_fields() {
        let store = InMemoryStore::new();

        store
            .set("k", vec![("a".to_string(), "1".to_string())])
            .await
            .unwrap();
        store
            .set("k", vec![("b".to_string(), "2".to_string())])
            .await
            .unwrap();

        let fields = store.get("k").await.unwrap();
        assert_eq!(fields.get("a"), Some(&"1".to_string()));
        assert_eq!(fields.get("b"), Some(&"2".to_string()));
    }

    #[tokio::test]
    async fn test_expire_reports_key_existence() {
        let store = InMemoryStore::new();

        assert!(!store.expire("missing", 60).await.unwrap());

        store
            .set("k", vec![("a".to_string(), "1".to_string())])
            .await
            .unwrap();
        assert!(store.expire("k", 60).await.unwrap());
    }

    #[tokio::test]
    async fn test_flush_all_clears_everything() {
        let store = InMemoryStore::new();

        store
            .set("k", vec![("a".to_string(), "1".to_string())])
            .await
            .unwrap();
        store.flush_all().await.unwrap();

        assert!(store.get("k").await.unwrap().is_empty());
    }
}
