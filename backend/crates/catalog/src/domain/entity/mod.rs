pub mod product;
pub mod review;

pub use product::{Product, ProductDetails, ProductSnapshot, ReviewError};
pub use review::Review;
