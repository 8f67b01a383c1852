//! Infrastructure Layer
//!
//! Database implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryProductRepository;
pub use postgres::PgProductRepository;
