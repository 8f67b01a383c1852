//! Session Transport
//!
//! Where a session token travels: the `jwt` cookie for browsers, or an
//! `Authorization: Bearer` header for other clients.

use axum::http::{HeaderMap, HeaderValue};
use derive_more::Display;
use platform::cookie::{CookieConfig, extract_bearer, extract_cookie};

use crate::application::config::IdentityConfig;
use crate::error::{IdentityError, IdentityResult};

/// One place a token may be found
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TokenSource {
    #[display("cookie {_0}")]
    Cookie(String),
    #[display("bearer header")]
    Bearer,
}

impl TokenSource {
    fn extract(&self, headers: &HeaderMap) -> Option<String> {
        match self {
            TokenSource::Cookie(name) => extract_cookie(headers, name),
            TokenSource::Bearer => extract_bearer(headers),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionTransport {
    /// Tried in order, first hit wins
    sources: Vec<TokenSource>,
    cookie: CookieConfig,
}

impl SessionTransport {
    pub fn new(sources: Vec<TokenSource>, cookie: CookieConfig) -> Self {
        Self { sources, cookie }
    }

    /// Cookie first, then bearer header
    pub fn from_config(config: &IdentityConfig) -> Self {
        Self::new(
            vec![
                TokenSource::Cookie(config.session_cookie_name.clone()),
                TokenSource::Bearer,
            ],
            config.cookie_config(),
        )
    }

    pub fn extract(&self, headers: &HeaderMap) -> Option<String> {
        self.sources.iter().find_map(|source| {
            let token = source.extract(headers)?;
            tracing::trace!(%source, "Session token found");
            Some(token)
        })
    }

    pub fn has_session_cookie(&self, headers: &HeaderMap) -> bool {
        extract_cookie(headers, &self.cookie.name).is_some()
    }

    /// `Set-Cookie` value carrying `token`
    pub fn attach(&self, token: &str) -> IdentityResult<HeaderValue> {
        self.cookie
            .set_cookie_header(token)
            .ok_or_else(|| IdentityError::Internal("session token is not a valid cookie value".into()))
    }

    /// `Set-Cookie` value that removes the session cookie
    pub fn clear(&self) -> IdentityResult<HeaderValue> {
        self.cookie
            .delete_cookie_header()
            .ok_or_else(|| IdentityError::Internal("invalid session cookie configuration".into()))
    }
}
