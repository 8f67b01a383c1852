//! Account read queries

use std::sync::Arc;

use crate::domain::entity::account_profile::AccountProfile;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::AccountId;
use crate::error::{IdentityError, IdentityResult};

pub struct AccountQueryUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> AccountQueryUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, account_id: AccountId) -> IdentityResult<AccountProfile> {
        self.repo
            .find_by_id(&account_id)
            .await?
            .map(|account| account.profile())
            .ok_or(IdentityError::AccountNotFound)
    }

    pub async fn list_all(&self) -> IdentityResult<Vec<AccountProfile>> {
        let accounts = self.repo.list_all().await?;
        Ok(accounts.iter().map(|account| account.profile()).collect())
    }
}
