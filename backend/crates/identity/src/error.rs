//! Identity Error Types
//!
//! Identity-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::is_unique_violation, kind::ErrorKind};
use kernel::validation::ValidationErrors;
use platform::deadline::DeadlineElapsed;
use thiserror::Error;

use crate::application::session_token::TokenError;

/// Identity-specific result type alias
pub type IdentityResult<T> = Result<T, IdentityError>;

#[derive(Debug, Error)]
pub enum IdentityError {
    /// One or more input fields were rejected
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("User already exists")]
    EmailTaken,

    #[error("User not found")]
    AccountNotFound,

    #[error("Invalid user id")]
    InvalidAccountId,

    /// Wrong password for an existing account
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not authorized, no token")]
    NoToken,

    /// Bad signature or malformed token
    #[error("Not authorized, token failed")]
    TokenInvalid,

    #[error("Not authorized, token expired")]
    TokenExpired,

    /// Token verified but its account was deleted
    #[error("Not authorized, account no longer exists")]
    AccountGone,

    /// A guarded route was reached without an identity in context
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Not authorized as an admin")]
    NotAdmin,

    #[error("Cannot delete admin user")]
    AdminUndeletable,

    /// Logout without a session cookie
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IdentityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::Validation(_) => ErrorKind::UnprocessableEntity,
            IdentityError::EmailTaken => ErrorKind::Conflict,
            IdentityError::AccountNotFound => ErrorKind::NotFound,
            IdentityError::InvalidAccountId | IdentityError::NotLoggedIn => ErrorKind::BadRequest,
            IdentityError::InvalidCredentials
            | IdentityError::NoToken
            | IdentityError::TokenInvalid
            | IdentityError::TokenExpired
            | IdentityError::AccountGone
            | IdentityError::AuthenticationRequired => ErrorKind::Unauthorized,
            IdentityError::NotAdmin | IdentityError::AdminUndeletable => ErrorKind::Forbidden,
            IdentityError::StoreUnavailable(_) => ErrorKind::ServiceUnavailable,
            IdentityError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            IdentityError::Validation(errors) => AppError::validation(errors.clone()),
            IdentityError::StoreUnavailable(_) => {
                AppError::service_unavailable("Service temporarily unavailable")
                    .with_action("Please try again later")
            }
            IdentityError::Internal(_) => AppError::internal("Internal server error"),
            IdentityError::TokenExpired => {
                AppError::new(self.kind(), self.to_string()).with_action("Please sign in again")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            IdentityError::StoreUnavailable(detail) => {
                tracing::error!(error = %detail, "Identity store unavailable");
            }
            IdentityError::Internal(msg) => {
                tracing::error!(message = %msg, "Identity internal error");
            }
            IdentityError::InvalidCredentials | IdentityError::TokenInvalid => {
                tracing::warn!(error = %self, "Rejected credentials");
            }
            _ => {
                tracing::debug!(error = %self, "Identity error");
            }
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<sqlx::Error> for IdentityError {
    fn from(err: sqlx::Error) -> Self {
        if is_unique_violation(&err) {
            IdentityError::EmailTaken
        } else {
            IdentityError::StoreUnavailable(err.to_string())
        }
    }
}

impl From<DeadlineElapsed> for IdentityError {
    fn from(err: DeadlineElapsed) -> Self {
        IdentityError::StoreUnavailable(err.to_string())
    }
}

impl From<TokenError> for IdentityError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => IdentityError::TokenInvalid,
            TokenError::Expired => IdentityError::TokenExpired,
            TokenError::Signing(msg) => IdentityError::Internal(msg),
        }
    }
}
