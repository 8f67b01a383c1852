//! Login Use Case
//!
//! Verifies email + password and issues a session token.

use std::sync::Arc;

use kernel::validation::ValidationErrors;

use crate::application::config::IdentityConfig;
use crate::application::hashing::verify_password;
use crate::application::session_token::SessionTokenCodec;
use crate::domain::entity::account_profile::AccountProfile;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{IdentityError, IdentityResult};

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginOutput {
    pub profile: AccountProfile,
    pub token: String,
}

pub struct LoginUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    codec: Arc<SessionTokenCodec>,
    config: Arc<IdentityConfig>,
}

impl<R> LoginUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, codec: Arc<SessionTokenCodec>, config: Arc<IdentityConfig>) -> Self {
        Self {
            repo,
            codec,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> IdentityResult<LoginOutput> {
        let mut errors = ValidationErrors::new();
        errors.check(!input.email.trim().is_empty(), "email", "Email is required");
        errors.check(!input.password.is_empty(), "password", "Password is required");
        errors.into_result()?;

        // A malformed address cannot belong to any account
        let email = Email::parse(&input.email).map_err(|_| IdentityError::AccountNotFound)?;

        let account = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(IdentityError::AccountNotFound)?;

        let raw = RawPassword::for_login(input.password);
        let valid = verify_password(self.config.hasher(), account.password.clone(), raw).await?;

        if !valid {
            tracing::warn!(account_id = %account.account_id, "Invalid login attempt");
            return Err(IdentityError::InvalidCredentials);
        }

        let token = self.codec.issue(account.account_id)?;

        tracing::info!(account_id = %account.account_id, "Account signed in");

        Ok(LoginOutput {
            profile: account.profile(),
            token,
        })
    }
}
