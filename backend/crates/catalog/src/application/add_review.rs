//! Add Review Use Case
//!
//! Enforces one review per author and product under concurrency: the
//! product is loaded, updated in memory and written back only if nobody
//! else wrote in between. A lost race reloads, so a second submission by
//! the same author sees the first and is rejected. Losing to other authors
//! only costs another round; the whole submission is bounded by
//! `review_timeout`.

use std::sync::Arc;

use kernel::validation::ValidationErrors;
use platform::deadline::bounded;

use crate::application::config::CatalogConfig;
use crate::domain::entity::{product::Product, review::Review};
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::{AccountId, ProductId, Rating};
use crate::error::{CatalogError, CatalogResult};

pub struct AddReviewInput {
    pub product_id: ProductId,
    pub author_id: AccountId,
    pub author_name: String,
    pub rating: Option<i64>,
    pub comment: String,
}

pub struct AddReviewUseCase<P>
where
    P: ProductRepository,
{
    repo: Arc<P>,
    config: Arc<CatalogConfig>,
}

impl<P> AddReviewUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(repo: Arc<P>, config: Arc<CatalogConfig>) -> Self {
        Self { repo, config }
    }

    /// Returns the product as persisted with the new review
    pub async fn execute(&self, input: AddReviewInput) -> CatalogResult<Product> {
        let mut errors = ValidationErrors::new();
        let rating = match input.rating {
            Some(value) => errors.capture("rating", Rating::new(value)),
            None => {
                errors.push("rating", "Rating is required");
                None
            }
        };
        errors.check(
            !input.comment.trim().is_empty(),
            "comment",
            "Comment is required",
        );
        let Some(rating) = rating.filter(|_| errors.is_empty()) else {
            return Err(CatalogError::Validation(errors));
        };

        let comment = input.comment.trim().to_string();

        match bounded(
            self.config.review_timeout,
            self.append(&input, rating, &comment),
        )
        .await
        {
            Ok(result) => result,
            Err(elapsed) => {
                tracing::warn!(
                    product_id = %input.product_id,
                    error = %elapsed,
                    "Review not stored before the deadline"
                );
                Err(elapsed.into())
            }
        }
    }

    /// Load, append, compare-and-swap; repeats only on version mismatch
    async fn append(
        &self,
        input: &AddReviewInput,
        rating: Rating,
        comment: &str,
    ) -> CatalogResult<Product> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            let mut product = self
                .repo
                .find_by_id(&input.product_id)
                .await?
                .ok_or(CatalogError::ProductNotFound)?;

            let expected_version = product.version();
            let review = Review::new(
                input.author_id,
                input.author_name.clone(),
                rating,
                comment.to_string(),
            );
            product.add_review(review.clone())?;

            if self
                .repo
                .save_with_review(&product, &review, expected_version)
                .await?
            {
                tracing::info!(
                    product_id = %input.product_id,
                    author_id = %input.author_id,
                    rating = %rating,
                    attempt,
                    "Review added"
                );
                return Ok(product);
            }

            tracing::debug!(
                product_id = %input.product_id,
                attempt,
                "Product changed during review, retrying"
            );
            tokio::task::yield_now().await;
        }
    }
}
