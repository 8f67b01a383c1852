//! Account Profile
//!
//! Read-only projection of an [`Account`](super::account::Account) carried
//! through request context and into responses.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{AccountId, display_name::DisplayName, email::Email};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    pub account_id: AccountId,
    pub email: Email,
    pub display_name: DisplayName,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}
