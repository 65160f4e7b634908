use std::sync::Arc;

use crate::application::services::MappingService;
use crate::domain::store::MappingStore;

/// Shared application state injected into all handlers.
///
/// The store connection is process-wide: opened once at startup and reused by
/// every request until ordered shutdown closes it.
#[derive(Clone)]
pub struct AppState {
    pub mappings: Arc<MappingService>,
    pub store: Arc<dyn MappingStore>,
    pub affiliate_base_url: String,
    pub api_key: String,
}
