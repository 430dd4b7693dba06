//! # Client Configuration
//!
//! Configuration for the checkout API client. The base URL is loaded
//! from environment variables; everything else has sensible defaults.

use checkout_core::{CheckoutError, CheckoutResult};
use std::env;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Checkout API configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the checkout API (scheme + host, no trailing slash)
    pub base_url: String,

    /// Default request timeout; per-request options may override it
    pub default_timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `CHECKOUT_API_BASE_URL`
    ///
    /// Optional:
    /// - `CHECKOUT_API_TIMEOUT_SECS` (defaults to 30)
    pub fn from_env() -> CheckoutResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let base_url = env::var("CHECKOUT_API_BASE_URL").map_err(|_| {
            CheckoutError::Configuration("CHECKOUT_API_BASE_URL not set".to_string())
        })?;

        let timeout_secs = env::var("CHECKOUT_API_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self::new(base_url).map(|config| config.with_timeout(Duration::from_secs(timeout_secs)))
    }

    /// Create a config with an explicit base URL (validated)
    pub fn new(base_url: impl Into<String>) -> CheckoutResult<Self> {
        let base_url: String = base_url.into();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CheckoutError::Configuration(
                "CHECKOUT_API_BASE_URL must start with http:// or https://".to_string(),
            ));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            default_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Builder: set the default request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }
}
