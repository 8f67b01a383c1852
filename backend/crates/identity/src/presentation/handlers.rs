//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;

use crate::application::{
    AccountQueryUseCase, DeleteAccountUseCase, IdentityConfig, LoginInput, LoginUseCase,
    ProfilePatch, RegisterInput, RegisterUseCase, SessionTokenCodec, UpdateProfileUseCase,
};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::AccountId;
use crate::error::{IdentityError, IdentityResult};
use crate::presentation::dto::{
    AccountResponse, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    UpdateProfileRequest,
};
use crate::presentation::middleware::CurrentAccount;
use crate::presentation::transport::SessionTransport;

/// Shared state for identity handlers and middleware
#[derive(Clone)]
pub struct IdentityState<R>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<IdentityConfig>,
    pub codec: Arc<SessionTokenCodec>,
    pub transport: Arc<SessionTransport>,
}

impl<R> IdentityState<R>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: IdentityConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            codec: Arc::new(SessionTokenCodec::from_config(&config)),
            transport: Arc::new(SessionTransport::from_config(&config)),
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Register / Login / Logout
// ============================================================================

/// POST /api/users
pub async fn register<R>(
    State(state): State<IdentityState<R>>,
    Json(req): Json<RegisterRequest>,
) -> IdentityResult<impl IntoResponse>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(RegisterInput {
            display_name: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = state.transport.attach(&output.token)?;

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(AccountResponse::from(output.profile)),
    ))
}

/// POST /api/users/auth
pub async fn login<R>(
    State(state): State<IdentityState<R>>,
    Json(req): Json<LoginRequest>,
) -> IdentityResult<impl IntoResponse>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = state.transport.attach(&output.token)?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            account: AccountResponse::from(output.profile),
            token: output.token,
        }),
    ))
}

/// POST /api/users/logout
///
/// Tokens are stateless; logging out only removes the cookie.
pub async fn logout<R>(
    State(state): State<IdentityState<R>>,
    headers: HeaderMap,
) -> IdentityResult<impl IntoResponse>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    if !state.transport.has_session_cookie(&headers) {
        return Err(IdentityError::NotLoggedIn);
    }

    let cookie = state.transport.clear()?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse {
            message: "Logged out successfully",
        }),
    ))
}

// ============================================================================
// Own Profile (authenticated)
// ============================================================================

/// GET /api/users/profile
pub async fn get_profile(CurrentAccount(profile): CurrentAccount) -> Json<AccountResponse> {
    Json(AccountResponse::from(profile))
}

/// PUT /api/users/profile
pub async fn update_profile<R>(
    State(state): State<IdentityState<R>>,
    CurrentAccount(profile): CurrentAccount,
    Json(req): Json<UpdateProfileRequest>,
) -> IdentityResult<Json<AccountResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateProfileUseCase::new(state.repo.clone(), state.config.clone());

    let updated = use_case
        .execute(
            profile.account_id,
            ProfilePatch {
                display_name: req.username,
                email: req.email,
                password: req.password,
            },
        )
        .await?;

    Ok(Json(AccountResponse::from(updated)))
}

// ============================================================================
// Administration (admin only)
// ============================================================================

/// GET /api/users
pub async fn list_accounts<R>(
    State(state): State<IdentityState<R>>,
) -> IdentityResult<Json<Vec<AccountResponse>>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let profiles = AccountQueryUseCase::new(state.repo.clone())
        .list_all()
        .await?;

    Ok(Json(profiles.into_iter().map(AccountResponse::from).collect()))
}

/// GET /api/users/{id}
pub async fn get_account<R>(
    State(state): State<IdentityState<R>>,
    Path(id): Path<String>,
) -> IdentityResult<Json<AccountResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let account_id = parse_account_id(&id)?;
    let profile = AccountQueryUseCase::new(state.repo.clone())
        .get(account_id)
        .await?;

    Ok(Json(AccountResponse::from(profile)))
}

/// DELETE /api/users/{id}
pub async fn delete_account<R>(
    State(state): State<IdentityState<R>>,
    Path(id): Path<String>,
) -> IdentityResult<Json<MessageResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let account_id = parse_account_id(&id)?;
    DeleteAccountUseCase::new(state.repo.clone())
        .execute(account_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "User removed",
    }))
}

fn parse_account_id(raw: &str) -> IdentityResult<AccountId> {
    raw.parse().map_err(|_| IdentityError::InvalidAccountId)
}
