//! Delete Product Use Case (admin)

use std::sync::Arc;

use crate::domain::entity::product::Product;
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::ProductId;
use crate::error::{CatalogError, CatalogResult};

pub struct DeleteProductUseCase<P>
where
    P: ProductRepository,
{
    repo: Arc<P>,
}

impl<P> DeleteProductUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    /// Returns the removed product
    pub async fn execute(&self, product_id: ProductId) -> CatalogResult<Product> {
        let product = self
            .repo
            .find_by_id(&product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound)?;

        if !self.repo.delete_by_id(&product_id).await? {
            return Err(CatalogError::ProductNotFound);
        }

        tracing::info!(
            product_id = %product_id,
            name = %product.details.name,
            num_reviews = product.num_reviews(),
            "Product deleted"
        );

        Ok(product)
    }
}
