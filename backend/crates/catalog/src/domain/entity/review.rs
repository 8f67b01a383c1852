//! Review Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{AccountId, Rating};

/// A customer's review, owned by its product
///
/// `author_id` only identifies the author; reviews outlive accounts.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub author_id: AccountId,
    /// Author's display name when the review was written
    pub author_name: String,
    pub rating: Rating,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(author_id: AccountId, author_name: String, rating: Rating, comment: String) -> Self {
        Self {
            author_id,
            author_name,
            rating,
            comment,
            created_at: Utc::now(),
        }
    }
}
