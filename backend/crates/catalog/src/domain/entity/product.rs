//! Product Aggregate
//!
//! Owns its reviews. `add_review` is the only way to change them, and it
//! keeps `num_reviews` and the mean `rating` in step with the list.
//! `revise` replaces the admin-editable details and leaves the review
//! aggregate and `version` alone.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::entity::review::Review;
use crate::domain::value_object::{AccountId, ProductId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("Product already reviewed")]
    AlreadyReviewed,
}

/// Catalog fields editable by an admin
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub name: String,
    pub description: String,
    pub brand: String,
    pub category: String,
    /// Image path or URL; uploads are handled elsewhere
    pub image: String,
    pub price: Decimal,
    pub quantity: i32,
    pub count_in_stock: i32,
}

/// Everything a store persists for a product
#[derive(Debug, Clone)]
pub struct ProductSnapshot {
    pub product_id: ProductId,
    pub details: ProductDetails,
    pub reviews: Vec<Review>,
    pub rating: f64,
    pub num_reviews: u32,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Product {
    pub product_id: ProductId,
    pub details: ProductDetails,
    reviews: Vec<Review>,
    rating: f64,
    num_reviews: u32,
    /// Bumped on every review; stores compare it before writing
    version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(details: ProductDetails) -> Self {
        let now = Utc::now();

        Self {
            product_id: ProductId::new(),
            details,
            reviews: Vec::new(),
            rating: 0.0,
            num_reviews: 0,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild from persisted state
    pub fn from_snapshot(snapshot: ProductSnapshot) -> Self {
        Self {
            product_id: snapshot.product_id,
            details: snapshot.details,
            reviews: snapshot.reviews,
            rating: snapshot.rating,
            num_reviews: snapshot.num_reviews,
            version: snapshot.version,
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
        }
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Mean of all review ratings, 0 when unreviewed
    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn num_reviews(&self) -> u32 {
        self.num_reviews
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn has_review_by(&self, author_id: &AccountId) -> bool {
        self.reviews.iter().any(|r| &r.author_id == author_id)
    }

    /// Replace the catalog details
    pub fn revise(&mut self, details: ProductDetails) {
        self.details = details;
        self.updated_at = Utc::now();
    }

    /// Append a review, at most one per author
    pub fn add_review(&mut self, review: Review) -> Result<(), ReviewError> {
        if self.has_review_by(&review.author_id) {
            return Err(ReviewError::AlreadyReviewed);
        }

        self.reviews.push(review);

        let total: u32 = self.reviews.iter().map(|r| u32::from(r.rating.value())).sum();
        self.num_reviews = self.reviews.len() as u32;
        self.rating = f64::from(total) / f64::from(self.num_reviews);
        self.version += 1;
        self.updated_at = Utc::now();

        Ok(())
    }
}
