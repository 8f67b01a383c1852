//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, middleware and session transport.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod transport;

pub use handlers::IdentityState;
pub use middleware::{CurrentAccount, require_admin, require_authentication};
pub use router::account_router;
pub use transport::{SessionTransport, TokenSource};
