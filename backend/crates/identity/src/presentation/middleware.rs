//! Identity Middleware
//!
//! `require_authentication` is the single place tokens are read. Handlers
//! behind it take a [`CurrentAccount`] and never see the token.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use crate::application::{AuthenticateUseCase, authorize};
use crate::domain::entity::account_profile::AccountProfile;
use crate::domain::repository::AccountRepository;
use crate::error::IdentityError;
use crate::presentation::handlers::IdentityState;

/// The authenticated caller, placed in request extensions
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub AccountProfile);

impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = IdentityError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentAccount>()
            .cloned()
            .ok_or(IdentityError::AuthenticationRequired)
    }
}

/// Middleware that requires a valid session token
pub async fn require_authentication<R>(
    State(state): State<IdentityState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, IdentityError>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let token = state.transport.extract(req.headers());

    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.codec.clone());
    let profile = use_case.execute(token.as_deref()).await?;

    req.extensions_mut().insert(CurrentAccount(profile));

    Ok(next.run(req).await)
}

/// Middleware that admits only admins
///
/// Must run inside `require_authentication`.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, IdentityError> {
    let identity = req.extensions().get::<CurrentAccount>().map(|c| &c.0);
    authorize::require_admin(identity)?;

    Ok(next.run(req).await)
}
