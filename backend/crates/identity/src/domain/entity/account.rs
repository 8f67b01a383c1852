//! Account Entity
//!
//! Credentials and role of a registered user. The password hash stays inside
//! this type; anything leaving the service goes through [`AccountProfile`].

use chrono::{DateTime, Utc};

use crate::domain::entity::account_profile::AccountProfile;
use crate::domain::value_object::{
    AccountId, display_name::DisplayName, email::Email, user_password::UserPassword,
};

#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: AccountId,
    /// Canonical email, unique across accounts
    pub email: Email,
    pub display_name: DisplayName,
    pub password: UserPassword,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new, non-admin account
    pub fn new(email: Email, display_name: DisplayName, password: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            account_id: AccountId::new(),
            email,
            display_name,
            password,
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Outward-facing projection without the password hash
    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            account_id: self.account_id,
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            is_admin: self.is_admin,
            created_at: self.created_at,
        }
    }

    pub fn change_email(&mut self, email: Email) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    pub fn change_display_name(&mut self, display_name: DisplayName) {
        self.display_name = display_name;
        self.updated_at = Utc::now();
    }

    pub fn change_password(&mut self, password: UserPassword) {
        self.password = password;
        self.updated_at = Utc::now();
    }
}
