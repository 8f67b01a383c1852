//! Repository Traits
//!
//! Interfaces for account persistence. Implementations live in `infra`.
//!
//! "Not found" is `Ok(None)` / `Ok(false)`; `Err` is reserved for store
//! failures and uniqueness conflicts.

use crate::domain::entity::account::Account;
use crate::domain::value_object::{AccountId, email::Email};
use crate::error::IdentityResult;

/// Credential store
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert a new account
    ///
    /// Email uniqueness is enforced atomically: a duplicate fails with
    /// `IdentityError::EmailTaken` even under concurrent inserts.
    async fn create(&self, account: &Account) -> IdentityResult<()>;

    async fn find_by_id(&self, account_id: &AccountId) -> IdentityResult<Option<Account>>;

    /// Look up by canonical email
    async fn find_by_email(&self, email: &Email) -> IdentityResult<Option<Account>>;

    /// Overwrite an existing account
    ///
    /// Fails with `EmailTaken` when the new email belongs to another account
    /// and `AccountNotFound` when the account no longer exists.
    async fn save(&self, account: &Account) -> IdentityResult<()>;

    /// Returns whether a row was deleted
    async fn delete_by_id(&self, account_id: &AccountId) -> IdentityResult<bool>;

    /// All accounts, oldest first
    async fn list_all(&self) -> IdentityResult<Vec<Account>>;
}
