//! In-memory credential store
//!
//! Used by tests and database-less local runs. Uniqueness checks and writes
//! happen under one write lock, so the same atomicity holds as with the
//! database's unique index.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{AccountId, email::Email};
use crate::error::{IdentityError, IdentityResult};

#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }
}

fn email_held_by_other(accounts: &HashMap<AccountId, Account>, account: &Account) -> bool {
    accounts
        .values()
        .any(|a| a.email == account.email && a.account_id != account.account_id)
}

impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: &Account) -> IdentityResult<()> {
        let mut accounts = self.accounts.write().await;
        if email_held_by_other(&accounts, account) {
            return Err(IdentityError::EmailTaken);
        }
        accounts.insert(account.account_id, account.clone());
        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> IdentityResult<Option<Account>> {
        Ok(self.accounts.read().await.get(account_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> IdentityResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| &a.email == email).cloned())
    }

    async fn save(&self, account: &Account) -> IdentityResult<()> {
        let mut accounts = self.accounts.write().await;
        if !accounts.contains_key(&account.account_id) {
            return Err(IdentityError::AccountNotFound);
        }
        if email_held_by_other(&accounts, account) {
            return Err(IdentityError::EmailTaken);
        }
        accounts.insert(account.account_id, account.clone());
        Ok(())
    }

    async fn delete_by_id(&self, account_id: &AccountId) -> IdentityResult<bool> {
        Ok(self.accounts.write().await.remove(account_id).is_some())
    }

    async fn list_all(&self) -> IdentityResult<Vec<Account>> {
        let accounts = self.accounts.read().await;
        let mut all: Vec<Account> = accounts.values().cloned().collect();
        all.sort_by_key(|a| (a.created_at, *a.account_id.as_uuid()));
        Ok(all)
    }
}
