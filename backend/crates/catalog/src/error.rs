//! Catalog Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::is_unique_violation, kind::ErrorKind};
use kernel::validation::ValidationErrors;
use platform::deadline::DeadlineElapsed;
use thiserror::Error;

use crate::domain::entity::product::ReviewError;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Product not found")]
    ProductNotFound,

    #[error("Invalid product id")]
    InvalidProductId,

    #[error("Product already reviewed")]
    AlreadyReviewed,

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) => ErrorKind::UnprocessableEntity,
            CatalogError::ProductNotFound => ErrorKind::NotFound,
            CatalogError::InvalidProductId => ErrorKind::BadRequest,
            CatalogError::AlreadyReviewed => ErrorKind::Conflict,
            CatalogError::StoreUnavailable(_) => ErrorKind::ServiceUnavailable,
            CatalogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            CatalogError::Validation(errors) => AppError::validation(errors.clone()),
            CatalogError::StoreUnavailable(_) => {
                AppError::service_unavailable("Service temporarily unavailable")
                    .with_action("Please try again later")
            }
            CatalogError::Internal(_) => AppError::internal("Internal server error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            CatalogError::StoreUnavailable(detail) => {
                tracing::error!(error = %detail, "Catalog store unavailable");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// The only unique constraint a catalog write can hit is one review per
/// author and product.
impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        if is_unique_violation(&err) {
            CatalogError::AlreadyReviewed
        } else {
            CatalogError::StoreUnavailable(err.to_string())
        }
    }
}

impl From<DeadlineElapsed> for CatalogError {
    fn from(err: DeadlineElapsed) -> Self {
        CatalogError::StoreUnavailable(err.to_string())
    }
}

impl From<ReviewError> for CatalogError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::AlreadyReviewed => CatalogError::AlreadyReviewed,
        }
    }
}
