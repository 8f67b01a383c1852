//! Session Token Codec
//!
//! Issues and verifies HS256-signed JWTs. Nothing is stored server-side:
//! a token is valid exactly when its signature checks out and it has not
//! expired.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::config::IdentityConfig;
use crate::domain::value_object::AccountId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Bad signature, wrong algorithm, malformed structure or subject
    #[error("token is invalid")]
    Invalid,

    #[error("token has expired")]
    Expired,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account id (UUID)
    pub sub: String,
    /// Issued at, seconds since epoch
    pub iat: i64,
    /// Expiry, seconds since epoch
    pub exp: i64,
}

pub struct SessionTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionTokenCodec {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn from_config(config: &IdentityConfig) -> Self {
        Self::new(&config.token_secret, config.token_ttl)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, account_id: AccountId) -> Result<String, TokenError> {
        self.issue_at(account_id, Utc::now())
    }

    /// Issue as if the current time were `now`
    pub fn issue_at(&self, account_id: AccountId, now: DateTime<Utc>) -> Result<String, TokenError> {
        let iat = now.timestamp();
        let claims = SessionClaims {
            sub: account_id.to_string(),
            iat,
            exp: iat + self.ttl.as_secs() as i64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Check signature, structure and expiry; return the subject
    pub fn verify(&self, token: &str) -> Result<AccountId, TokenError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            },
        )?;

        data.claims.sub.parse().map_err(|_| TokenError::Invalid)
    }
}

impl std::fmt::Debug for SessionTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenCodec")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEN_DAYS: Duration = Duration::from_secs(10 * 24 * 3600);

    fn codec() -> SessionTokenCodec {
        SessionTokenCodec::new(b"test-secret-test-secret-test-sec", TEN_DAYS)
    }

    #[test]
    fn test_issue_then_verify() {
        let id = AccountId::new();
        let token = codec().issue(id).unwrap();
        assert_eq!(codec().verify(&token), Ok(id));
    }

    #[test]
    fn test_expiry_is_ten_days_after_issue() {
        let now = Utc::now();
        let token = codec().issue_at(AccountId::new(), now).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let claims = decode::<SessionClaims>(
            &token,
            &DecodingKey::from_secret(b"test-secret-test-secret-test-sec"),
            &validation,
        )
        .unwrap()
        .claims;

        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 864_000);
    }

    #[test]
    fn test_expired_token_with_valid_signature() {
        let issued = Utc::now() - chrono::Duration::days(11);
        let token = codec().issue_at(AccountId::new(), issued).unwrap();
        assert_eq!(codec().verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let token = codec().issue(AccountId::new()).unwrap();
        let dot = token.find('.').unwrap();
        let mut bytes = token.into_bytes();
        let pos = dot + 5;
        bytes[pos] = if bytes[pos] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert_eq!(codec().verify(&tampered), Err(TokenError::Invalid));
    }

    #[test]
    fn test_other_secret_is_invalid() {
        let token = codec().issue(AccountId::new()).unwrap();
        let other = SessionTokenCodec::new(b"another-secret", TEN_DAYS);
        assert_eq!(other.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert_eq!(codec().verify(""), Err(TokenError::Invalid));
        assert_eq!(codec().verify("not.a.jwt"), Err(TokenError::Invalid));
    }

    #[test]
    fn test_non_uuid_subject_is_invalid() {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: "admin".to_string(),
            iat: now,
            exp: now + 60,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret-test-secret-test-sec"),
        )
        .unwrap();

        assert_eq!(codec().verify(&token), Err(TokenError::Invalid));
    }
}
