//! Value Object Module

pub mod rating;

pub use kernel::id::{AccountId, ProductId};
pub use rating::{Rating, RatingError};
