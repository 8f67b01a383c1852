//! Repository Traits

use crate::domain::entity::{product::Product, review::Review};
use crate::domain::value_object::ProductId;
use crate::error::CatalogResult;

/// Product store
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    async fn create(&self, product: &Product) -> CatalogResult<()>;

    /// Product with all its reviews
    async fn find_by_id(&self, product_id: &ProductId) -> CatalogResult<Option<Product>>;

    /// Persist `product`'s new aggregate together with the inserted `review`
    ///
    /// Compare-and-swap: applies only if the stored version still equals
    /// `expected_version`, and returns `false` otherwise so the caller can
    /// reload and retry.
    async fn save_with_review(
        &self,
        product: &Product,
        review: &Review,
        expected_version: i64,
    ) -> CatalogResult<bool>;

    /// Write `product.details` and `updated_at` only
    ///
    /// Reviews, the aggregate and `version` are left as stored, so this
    /// never races with `save_with_review`. `false` when the product is
    /// absent.
    async fn update_details(&self, product: &Product) -> CatalogResult<bool>;

    /// Remove a product together with its reviews
    async fn delete_by_id(&self, product_id: &ProductId) -> CatalogResult<bool>;

    /// Highest rated first
    async fn top_rated(&self, limit: usize) -> CatalogResult<Vec<Product>>;
}
