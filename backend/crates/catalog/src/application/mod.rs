//! Application Layer

pub mod add_review;
pub mod config;
pub mod create_product;
pub mod delete_product;
pub mod product_query;
pub mod update_product;

pub use add_review::{AddReviewInput, AddReviewUseCase};
pub use config::CatalogConfig;
pub use create_product::{CreateProductUseCase, ProductInput};
pub use delete_product::DeleteProductUseCase;
pub use product_query::ProductQueryUseCase;
pub use update_product::UpdateProductUseCase;
