#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;

use affiliate_redirector::application::services::MappingService;
use affiliate_redirector::domain::mapping::{MappingParams, ReverseRecord, reverse_key};
use affiliate_redirector::domain::store::{MappingStore, StoreError, StoreFields};
use affiliate_redirector::infrastructure::store::InMemoryStore;
use affiliate_redirector::state::AppState;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_BASE_URL: &str = "https://affiliate-network.com";

/// Builds application state over an in-memory store, returning the store
/// handle so tests can prime and inspect records directly.
pub fn create_test_state() -> (AppState, Arc<InMemoryStore>) {
    create_test_state_with_ttl(None)
}

pub fn create_test_state_with_ttl(ttl_seconds: Option<u64>) -> (AppState, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let store_dyn: Arc<dyn MappingStore> = store.clone();

    let mappings = Arc::new(MappingService::new(store_dyn.clone(), ttl_seconds));

    let state = AppState {
        mappings,
        store: store_dyn,
        affiliate_base_url: TEST_BASE_URL.to_string(),
        api_key: TEST_API_KEY.to_string(),
    };

    (state, store)
}

/// Writes a reverse record for `token` straight into the store.
pub async fn prime_reverse_record(
    store: &InMemoryStore,
    token: &str,
    params: &MappingParams,
    created_at: &str,
) {
    store
        .set(
            &reverse_key(token),
            ReverseRecord {
                payload: params.to_payload(),
                created_at: Some(created_at.to_string()),
            }
            .to_fields(),
        )
        .await
        .unwrap();
}

pub fn sample_params() -> MappingParams {
    MappingParams {
        keyword: "shoes".to_string(),
        src: "google".to_string(),
        creative: "1234".to_string(),
    }
}

/// Store whose every operation fails, for exercising 5xx paths.
pub struct FailingStore;

#[async_trait]
impl MappingStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<StoreFields, StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _fields: Vec<(String, String)>) -> Result<(), StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn expire(&self, _key: &str, _ttl_seconds: u64) -> Result<bool, StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn flush_all(&self) -> Result<(), StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn close(&self) {}
}

/// Builds application state over a store whose operations all fail.
pub fn create_failing_state() -> AppState {
    let store: Arc<dyn MappingStore> = Arc::new(FailingStore);
    let mappings = Arc::new(MappingService::new(store.clone(), None));

    AppState {
        mappings,
        store,
        affiliate_base_url: TEST_BASE_URL.to_string(),
        api_key: TEST_API_KEY.to_string(),
    }
}
