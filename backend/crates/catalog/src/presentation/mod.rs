//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::CatalogState;
pub use router::product_router;
