//! Application Layer
//!
//! Use cases and application services.

pub mod account_query;
pub mod authenticate;
pub mod authorize;
pub mod config;
pub mod delete_account;
mod hashing;
pub mod login;
pub mod register;
pub mod session_token;
pub mod update_profile;

// Re-exports
pub use account_query::AccountQueryUseCase;
pub use authenticate::AuthenticateUseCase;
pub use config::IdentityConfig;
pub use delete_account::DeleteAccountUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use session_token::{SessionClaims, SessionTokenCodec, TokenError};
pub use update_profile::{ProfilePatch, UpdateProfileUseCase};
