//! Update Profile Use Case
//!
//! The caller edits their own name, email and password. The admin flag is
//! not reachable from here.

use std::sync::Arc;

use kernel::validation::ValidationErrors;

use crate::application::config::IdentityConfig;
use crate::application::hashing::hash_password;
use crate::domain::entity::account_profile::AccountProfile;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    AccountId, display_name::DisplayName, email::Email, user_password::RawPassword,
};
use crate::error::{IdentityError, IdentityResult};

/// Fields left `None` (or sent blank) keep their current value
#[derive(Default)]
pub struct ProfilePatch {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl ProfilePatch {
    fn normalized(self) -> Self {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        Self {
            display_name: present(self.display_name),
            email: present(self.email),
            password: present(self.password),
        }
    }
}

pub struct UpdateProfileUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<IdentityConfig>,
}

impl<R> UpdateProfileUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<IdentityConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        account_id: AccountId,
        patch: ProfilePatch,
    ) -> IdentityResult<AccountProfile> {
        let patch = patch.normalized();

        let mut errors = ValidationErrors::new();
        let display_name = patch
            .display_name
            .and_then(|raw| errors.capture("username", DisplayName::new(&raw)));
        let email = patch
            .email
            .and_then(|raw| errors.capture("email", Email::parse(&raw)));
        let password = patch
            .password
            .and_then(|raw| errors.capture("password", RawPassword::new(raw)));
        errors.into_result()?;

        let mut account = self
            .repo
            .find_by_id(&account_id)
            .await?
            .ok_or(IdentityError::AccountNotFound)?;

        if let Some(email) = email.filter(|e| *e != account.email) {
            if self.repo.find_by_email(&email).await?.is_some() {
                return Err(IdentityError::EmailTaken);
            }
            account.change_email(email);
        }

        if let Some(display_name) = display_name {
            account.change_display_name(display_name);
        }

        if let Some(password) = password {
            let hashed = hash_password(self.config.hasher(), password).await?;
            account.change_password(hashed);
        }

        self.repo.save(&account).await?;

        tracing::info!(account_id = %account.account_id, "Profile updated");

        Ok(account.profile())
    }
}
