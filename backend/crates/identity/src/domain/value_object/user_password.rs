//! User Password Value Object
//!
//! Domain wrapper over `platform::password`.
//!
//! - `RawPassword::new` enforces the policy (registration, password change)
//! - `RawPassword::for_login` skips it, so a wrong password always reaches
//!   verification and fails as invalid credentials
//! - `UserPassword` holds the stored PHC string and never the plaintext

use std::fmt;

use platform::password::{
    Argon2Hasher, ClearTextPassword, PasswordHashError, PasswordPolicyError,
};

/// Raw password from user input, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        ClearTextPassword::new(raw).map(Self)
    }

    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Stored password hash (PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(String);

impl UserPassword {
    /// Hash a policy-checked password
    pub fn from_raw(raw: &RawPassword, hasher: &Argon2Hasher) -> Result<Self, PasswordHashError> {
        let hashed = hasher.hash(&raw.0)?;
        Ok(Self(hashed.as_phc_string().to_string()))
    }

    /// Create from database value
    ///
    /// Not parsed here: a corrupt hash must fail verification, not loading.
    pub fn from_db(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn verify(&self, raw: &RawPassword, hasher: &Argon2Hasher) -> bool {
        hasher.verify(&raw.0, &self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}
