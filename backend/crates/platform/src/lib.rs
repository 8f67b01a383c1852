//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Environment-driven configuration helpers
//! - Cookie and Authorization header handling
//! - Cryptographic utilities (random secrets, Base64)
//! - Deadlines for calls into external stores
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)

pub mod config;
pub mod cookie;
pub mod crypto;
pub mod deadline;
pub mod password;
