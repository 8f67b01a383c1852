//! Domain Layer

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::{Product, Review};
pub use repository::ProductRepository;
