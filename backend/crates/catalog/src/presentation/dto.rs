//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::ProductInput;
use crate::domain::entity::{product::Product, review::Review};
use crate::domain::value_object::{AccountId, ProductId, Rating};

// ============================================================================
// Requests
// ============================================================================

/// Create or update product request
///
/// Every field is optional on the wire so that missing ones come back as
/// field violations rather than a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductRequest {
    pub name: String,
    pub description: String,
    pub brand: String,
    pub category: String,
    pub image: String,
    pub price: Option<Decimal>,
    pub quantity: Option<i64>,
    pub count_in_stock: Option<i64>,
}

impl From<ProductRequest> for ProductInput {
    fn from(req: ProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            brand: req.brand,
            category: req.category,
            image: req.image,
            price: req.price,
            quantity: req.quantity,
            count_in_stock: req.count_in_stock,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddReviewRequest {
    pub rating: Option<i64>,
    pub comment: String,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub user: AccountId,
    pub name: String,
    pub rating: Rating,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            user: review.author_id,
            name: review.author_name.clone(),
            rating: review.rating,
            comment: review.comment.clone(),
            created_at: review.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub brand: String,
    pub category: String,
    pub image: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub quantity: i32,
    pub count_in_stock: i32,
    pub rating: f64,
    pub num_reviews: u32,
    pub reviews: Vec<ReviewResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let reviews = product.reviews().iter().map(ReviewResponse::from).collect();
        let rating = product.rating();
        let num_reviews = product.num_reviews();
        let details = product.details;

        Self {
            id: product.product_id,
            name: details.name,
            description: details.description,
            brand: details.brand,
            category: details.category,
            image: details.image,
            price: details.price,
            quantity: details.quantity,
            count_in_stock: details.count_in_stock,
            rating,
            num_reviews,
            reviews,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductDeletedResponse {
    pub name: String,
    pub message: String,
}
