//! PostgreSQL Repository Implementation

use std::time::Duration;

use chrono::{DateTime, Utc};
use platform::deadline::bounded;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    AccountId, display_name::DisplayName, email::Email, user_password::UserPassword,
};
use crate::error::{IdentityError, IdentityResult};

const ACCOUNT_COLUMNS: &str =
    "account_id, email, display_name, password_hash, is_admin, created_at, updated_at";

/// PostgreSQL-backed credential store
///
/// Every query is bounded by `store_timeout`.
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
    store_timeout: Duration,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool, store_timeout: Duration) -> Self {
        Self {
            pool,
            store_timeout,
        }
    }
}

impl AccountRepository for PgAccountRepository {
    async fn create(&self, account: &Account) -> IdentityResult<()> {
        // Unique index on email: a concurrent duplicate fails with 23505
        bounded(
            self.store_timeout,
            sqlx::query(
                r#"
                INSERT INTO accounts (
                    account_id,
                    email,
                    display_name,
                    password_hash,
                    is_admin,
                    created_at,
                    updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(account.account_id.as_uuid())
            .bind(account.email.as_str())
            .bind(account.display_name.as_str())
            .bind(account.password.as_str())
            .bind(account.is_admin)
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool),
        )
        .await??;

        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> IdentityResult<Option<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE account_id = $1");
        let row = bounded(
            self.store_timeout,
            sqlx::query_as::<_, AccountRow>(&sql)
                .bind(account_id.as_uuid())
                .fetch_optional(&self.pool),
        )
        .await??;

        Ok(row.map(AccountRow::into_account))
    }

    async fn find_by_email(&self, email: &Email) -> IdentityResult<Option<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1");
        let row = bounded(
            self.store_timeout,
            sqlx::query_as::<_, AccountRow>(&sql)
                .bind(email.as_str())
                .fetch_optional(&self.pool),
        )
        .await??;

        Ok(row.map(AccountRow::into_account))
    }

    async fn save(&self, account: &Account) -> IdentityResult<()> {
        let result = bounded(
            self.store_timeout,
            sqlx::query(
                r#"
                UPDATE accounts SET
                    email = $2,
                    display_name = $3,
                    password_hash = $4,
                    is_admin = $5,
                    updated_at = $6
                WHERE account_id = $1
                "#,
            )
            .bind(account.account_id.as_uuid())
            .bind(account.email.as_str())
            .bind(account.display_name.as_str())
            .bind(account.password.as_str())
            .bind(account.is_admin)
            .bind(account.updated_at)
            .execute(&self.pool),
        )
        .await??;

        if result.rows_affected() == 0 {
            return Err(IdentityError::AccountNotFound);
        }
        Ok(())
    }

    async fn delete_by_id(&self, account_id: &AccountId) -> IdentityResult<bool> {
        let result = bounded(
            self.store_timeout,
            sqlx::query("DELETE FROM accounts WHERE account_id = $1")
                .bind(account_id.as_uuid())
                .execute(&self.pool),
        )
        .await??;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> IdentityResult<Vec<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY created_at, account_id");
        let rows = bounded(
            self.store_timeout,
            sqlx::query_as::<_, AccountRow>(&sql).fetch_all(&self.pool),
        )
        .await??;

        Ok(rows.into_iter().map(AccountRow::into_account).collect())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    email: String,
    display_name: String,
    password_hash: String,
    is_admin: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> Account {
        Account {
            account_id: AccountId::from_uuid(self.account_id),
            email: Email::from_db(self.email),
            display_name: DisplayName::from_db(self.display_name),
            password: UserPassword::from_db(self.password_hash),
            is_admin: self.is_admin,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
