//! Register Use Case
//!
//! Creates a non-admin account and signs it in.

use std::sync::Arc;

use kernel::validation::ValidationErrors;

use crate::application::config::IdentityConfig;
use crate::application::hashing::hash_password;
use crate::application::session_token::SessionTokenCodec;
use crate::domain::entity::{account::Account, account_profile::AccountProfile};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_password::RawPassword,
};
use crate::error::{IdentityError, IdentityResult};

pub struct RegisterInput {
    pub display_name: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterOutput {
    pub profile: AccountProfile,
    pub token: String,
}

pub struct RegisterUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    codec: Arc<SessionTokenCodec>,
    config: Arc<IdentityConfig>,
}

impl<R> RegisterUseCase<R>
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

    pub async fn execute(&self, input: RegisterInput) -> IdentityResult<RegisterOutput> {
        // Report every bad field at once
        let mut errors = ValidationErrors::new();
        let display_name = errors.capture("username", DisplayName::new(&input.display_name));
        let email = errors.capture("email", Email::parse(&input.email));
        let password = errors.capture("password", RawPassword::new(input.password));

        let (Some(display_name), Some(email), Some(password)) = (display_name, email, password)
        else {
            return Err(IdentityError::Validation(errors));
        };

        // Cheap early exit; the store's unique index is what actually decides
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(IdentityError::EmailTaken);
        }

        let hashed = hash_password(self.config.hasher(), password).await?;
        let account = Account::new(email, display_name, hashed);

        self.repo.create(&account).await?;

        let token = self.codec.issue(account.account_id)?;

        tracing::info!(account_id = %account.account_id, "Account registered");

        Ok(RegisterOutput {
            profile: account.profile(),
            token,
        })
    }
}
