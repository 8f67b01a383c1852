//! Authenticate Use Case
//!
//! Resolves a raw session token to the caller's profile.

use std::sync::Arc;

use crate::application::session_token::SessionTokenCodec;
use crate::domain::entity::account_profile::AccountProfile;
use crate::domain::repository::AccountRepository;
use crate::error::{IdentityError, IdentityResult};

pub struct AuthenticateUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    codec: Arc<SessionTokenCodec>,
}

impl<R> AuthenticateUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, codec: Arc<SessionTokenCodec>) -> Self {
        Self { repo, codec }
    }

    /// `token` is whatever the transport found, if anything
    pub async fn execute(&self, token: Option<&str>) -> IdentityResult<AccountProfile> {
        let token = token.ok_or(IdentityError::NoToken)?;
        let account_id = self.codec.verify(token)?;

        let account = self
            .repo
            .find_by_id(&account_id)
            .await?
            .ok_or(IdentityError::AccountGone)?;

        Ok(account.profile())
    }
}
