//! Identity (Accounts & Access Control) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Account entity, value objects, repository trait
//! - `application/` - Use cases, session token codec, configuration
//! - `infra/` - PostgreSQL and in-memory credential stores
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Features
//! - Registration and login with email + password
//! - Stateless HS256 session tokens (10 days), sent as the `jwt` cookie or
//!   an `Authorization: Bearer` header
//! - Authentication and admin-only gates usable by other crates' routers
//! - Self-service profile edits and admin account management
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Password hashes never leave the domain layer
//! - Email uniqueness enforced by the store, not by check-then-write
//! - Admin accounts cannot be deleted through the API

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::IdentityConfig;
pub use error::{IdentityError, IdentityResult};
pub use infra::{memory::InMemoryAccountRepository, postgres::PgAccountRepository};
pub use presentation::{
    CurrentAccount, IdentityState, account_router, require_admin, require_authentication,
};
