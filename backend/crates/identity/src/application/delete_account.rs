//! Delete Account Use Case (admin)

use std::sync::Arc;

use crate::domain::repository::AccountRepository;
use crate::domain::value_object::AccountId;
use crate::error::{IdentityError, IdentityResult};

pub struct DeleteAccountUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteAccountUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Admin accounts can never be deleted
    pub async fn execute(&self, target: AccountId) -> IdentityResult<()> {
        let account = self
            .repo
            .find_by_id(&target)
            .await?
            .ok_or(IdentityError::AccountNotFound)?;

        if account.is_admin {
            tracing::warn!(account_id = %target, "Refused to delete admin account");
            return Err(IdentityError::AdminUndeletable);
        }

        if !self.repo.delete_by_id(&target).await? {
            return Err(IdentityError::AccountNotFound);
        }

        tracing::info!(account_id = %target, "Account deleted");
        Ok(())
    }
}
