//! Argon2 work off the async executor
//!
//! A single hash takes tens of milliseconds and 19 MiB; running it on a
//! runtime worker would stall every other task scheduled there.

use platform::password::Argon2Hasher;

use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{IdentityError, IdentityResult};

pub(crate) async fn hash_password(
    hasher: Argon2Hasher,
    raw: RawPassword,
) -> IdentityResult<UserPassword> {
    tokio::task::spawn_blocking(move || UserPassword::from_raw(&raw, &hasher))
        .await
        .map_err(|e| IdentityError::Internal(e.to_string()))?
        .map_err(|e| IdentityError::Internal(e.to_string()))
}

pub(crate) async fn verify_password(
    hasher: Argon2Hasher,
    stored: UserPassword,
    raw: RawPassword,
) -> IdentityResult<bool> {
    tokio::task::spawn_blocking(move || stored.verify(&raw, &hasher))
        .await
        .map_err(|e| IdentityError::Internal(e.to_string()))
}
