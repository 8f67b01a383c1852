//! Catalog (Products & Reviews) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Product aggregate with its review ledger, repository trait
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL and in-memory product stores
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Review Ledger
//! - One review per account and product, also under concurrent submissions
//! - `num_reviews` and the mean `rating` recomputed on every insert and
//!   persisted together with it
//! - Reviews cannot be edited or removed

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use infra::{memory::InMemoryProductRepository, postgres::PgProductRepository};
pub use presentation::{CatalogState, product_router};

#[cfg(test)]
mod tests;
