//! Authorization checks

use crate::domain::entity::account_profile::AccountProfile;
use crate::error::{IdentityError, IdentityResult};

/// Admit only an authenticated admin
///
/// Missing identity is 401, a non-admin identity is 403.
pub fn require_admin(identity: Option<&AccountProfile>) -> IdentityResult<&AccountProfile> {
    match identity {
        None => Err(IdentityError::AuthenticationRequired),
        Some(profile) if !profile.is_admin => Err(IdentityError::NotAdmin),
        Some(profile) => Ok(profile),
    }
}
