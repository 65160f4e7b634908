//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts.
//!
//! ## Required Variables
//!
//! - `API_KEY` - secret for the retrieval endpoint, must be non-empty
//!
//! ## Optional Variables
//!
//! - `AFFILIATE_BASE_URL` - redirect target base (default: `https://affiliate-network.com`)
//! - `REDIS_URL` / `REDIS_HOST` - store connection (default: `redis://localhost:6379`)
//! - `LISTEN` - bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - log level (default: `info`)
//! - `LOG_FORMAT` - log format: `text` or `json` (default: `text`)
//! - `MAPPING_TTL_SECONDS` - store-level expiry for mapping records; records
//!   never expire when unset
//!
//! If `REDIS_URL` is not set, it is constructed from `REDIS_HOST`,
//! `REDIS_PORT`, `REDIS_PASSWORD`, and `REDIS_DB` when `REDIS_HOST` is
//! present.

use anyhow::{Context, Result};
use std::env;
use url::Url;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL the redirect points at; the issued token is appended as
    /// `?our_param={token}`.
    pub affiliate_base_url: String,
    pub redis_url: String,
    /// Secret compared verbatim against the caller-supplied API key.
    pub api_key: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// TTL (seconds) applied to both records of a new mapping event.
    /// `None` disables store-level expiry.
    pub mapping_ttl_seconds: Option<u64>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `API_KEY` is missing or `MAPPING_TTL_SECONDS` is
    /// set to a non-integer value.
    pub fn from_env() -> Result<Self> {
        let affiliate_base_url = env::var("AFFILIATE_BASE_URL")
            .unwrap_or_else(|_| "https://affiliate-network.com".to_string());

        let redis_url = Self::load_redis_url();

        let api_key = env::var("API_KEY").context("API_KEY must be set")?;

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let mapping_ttl_seconds = env::var("MAPPING_TTL_SECONDS")
            .ok()
            .map(|v| {
                v.parse().with_context(|| {
                    format!("MAPPING_TTL_SECONDS must be an integer, got '{}'", v)
                })
            })
            .transpose()?;

        Ok(Self {
            affiliate_base_url,
            redis_url,
            api_key,
            listen_addr,
            log_level,
            log_format,
            mapping_ttl_seconds,
        })
    }

    /// Loads the Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    /// 3. `redis://localhost:6379`
    fn load_redis_url() -> String {
        if let Ok(url) = env::var("REDIS_URL") {
            return url;
        }

        let Ok(host) = env::var("REDIS_HOST") else {
            return "redis://localhost:6379".to_string();
        };

        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let password = env::var("REDIS_PASSWORD").ok();
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        match password {
            // Empty password means no authentication
            Some(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            _ => format!("redis://{}:{}/{}", host, port, db),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `AFFILIATE_BASE_URL` is not an absolute http(s) URL
    /// - `REDIS_URL` does not use a redis scheme
    /// - `API_KEY` is empty
    /// - `LOG_FORMAT` is not `text` or `json`
    /// - `LISTEN` is not in `host:port` form
    /// - `MAPPING_TTL_SECONDS` is set to zero
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.affiliate_base_url).with_context(|| {
            format!(
                "AFFILIATE_BASE_URL is not a valid URL: '{}'",
                self.affiliate_base_url
            )
        })?;
        if base.scheme() != "http" && base.scheme() != "https" {
            anyhow::bail!(
                "AFFILIATE_BASE_URL must use http or https, got '{}'",
                self.affiliate_base_url
            );
        }

        if !self.redis_url.starts_with("redis://") && !self.redis_url.starts_with("rediss://") {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                self.redis_url
            );
        }

        if self.api_key.is_empty() {
            anyhow::bail!("API_KEY must not be empty");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.mapping_ttl_seconds == Some(0) {
            anyhow::bail!("MAPPING_TTL_SECONDS must be greater than 0 when set");
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Affiliate base URL: {}", self.affiliate_base_url);
        tracing::info!("  Redis: {}", mask_connection_string(&self.redis_url));
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);

        match self.mapping_ttl_seconds {
            Some(ttl) => tracing::info!("  Mapping TTL: {}s", ttl),
            None => tracing::info!("  Mapping TTL: disabled"),
        }
    }
}

/// Masks the password in connection strings for logging.
///
/// `redis://:password@host:port/db` → `redis://:***@host:port/db`
fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
