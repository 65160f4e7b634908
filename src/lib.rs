//! # Affiliate Redirector
//!
//! A link-shortening / affiliate-redirect service built with Axum and Redis.
//!
//! Given a tuple of marketing parameters (`keyword`, `src`, `creative`), the
//! service issues a short opaque token, redirects the caller to an affiliate
//! URL carrying that token, and later recovers the original tuple from the
//! token.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - mapping records, key construction, and
//!   the store contract
//! - **Application Layer** ([`application`]) - the mapping engine:
//!   reuse/refresh resolution and reverse lookup
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory
//!   store implementations
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! # Set required environment variables
//! export API_KEY="change-me"
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! # Start the service
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{MappingError, MappingService};
    pub use crate::domain::mapping::{ForwardRecord, MappingParams, ReverseRecord};
    pub use crate::domain::store::{MappingStore, StoreError};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
