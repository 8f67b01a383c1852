//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::account_profile::AccountProfile;
use crate::domain::value_object::AccountId;

// ============================================================================
// Requests
// ============================================================================

/// Register request
///
/// Missing fields deserialize as empty so they are reported as field
/// violations. Unknown fields (an `isAdmin` flag, say) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Profile update request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// Public view of an account
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<AccountProfile> for AccountResponse {
    fn from(profile: AccountProfile) -> Self {
        Self {
            id: profile.account_id,
            username: profile.display_name.as_str().to_string(),
            email: profile.email.into_db(),
            is_admin: profile.is_admin,
            created_at: profile.created_at,
        }
    }
}

/// Login response; the token is repeated for bearer clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(flatten)]
    pub account: AccountResponse,
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
