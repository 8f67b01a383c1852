//! Application Configuration

use std::time::Duration;

use platform::config::{self, ConfigError};

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Upper bound for a single product store call
    pub store_timeout: Duration,
    /// Size of the top-rated listing
    pub top_rated_limit: usize,
    /// Budget for a review submission, retries on contention included
    pub review_timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_secs(5),
            top_rated_limit: 4,
            review_timeout: Duration::from_secs(10),
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            store_timeout: config::env_duration_secs("STORE_TIMEOUT_SECS", defaults.store_timeout)?,
            review_timeout: config::env_duration_secs(
                "REVIEW_TIMEOUT_SECS",
                defaults.review_timeout,
            )?,
            ..defaults
        })
    }
}
