//! Application Configuration
//!
//! Configuration for the Identity application layer.

use std::time::Duration;

use platform::config::{self, ConfigError};
use platform::cookie::CookieConfig;
use platform::crypto;
use platform::password::Argon2Hasher;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Identity application configuration
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// HMAC-SHA256 key for session tokens
    pub token_secret: Vec<u8>,
    /// Session token lifetime (10 days)
    pub token_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Upper bound for a single credential store call
    pub store_timeout: Duration,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "jwt".to_string(),
            token_secret: vec![0u8; 32],
            token_ttl: Duration::from_secs(10 * 24 * 3600), // 10 days
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
            password_pepper: None,
            store_timeout: Duration::from_secs(5),
        }
    }
}

impl IdentityConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: crypto::random_secret(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Load from the environment
    ///
    /// `JWT_SECRET` is required; `base64:` secrets are decoded.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let token_secret = decode("JWT_SECRET", &config::env_required("JWT_SECRET")?)?;
        let password_pepper = config::env_var("PASSWORD_PEPPER")
            .map(|raw| decode("PASSWORD_PEPPER", &raw))
            .transpose()?;

        Ok(Self {
            token_secret,
            password_pepper,
            cookie_secure: config::env_bool("COOKIE_SECURE", config::is_production())?,
            store_timeout: config::env_duration_secs("STORE_TIMEOUT_SECS", defaults.store_timeout)?,
            ..defaults
        })
    }

    /// Cookie settings for the session cookie
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.token_ttl.as_secs() as i64),
        }
    }

    /// Password hasher carrying the configured pepper
    pub fn hasher(&self) -> Argon2Hasher {
        Argon2Hasher::new(self.password_pepper.clone())
    }
}

fn decode(key: &str, raw: &str) -> Result<Vec<u8>, ConfigError> {
    crypto::decode_secret(raw).map_err(|e| ConfigError::Invalid {
        key: key.to_string(),
        value: "<redacted>".to_string(),
        reason: e.to_string(),
    })
}
