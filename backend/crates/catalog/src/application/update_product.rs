//! Update Product Use Case (admin)

use std::sync::Arc;

use crate::application::create_product::ProductInput;
use crate::domain::entity::product::Product;
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::ProductId;
use crate::error::{CatalogError, CatalogResult};

pub struct UpdateProductUseCase<P>
where
    P: ProductRepository,
{
    repo: Arc<P>,
}

impl<P> UpdateProductUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    /// Replaces the details; reviews and rating stay as they are
    pub async fn execute(&self, product_id: ProductId, input: ProductInput) -> CatalogResult<Product> {
        let mut product = self
            .repo
            .find_by_id(&product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound)?;

        product.revise(input.validate()?);

        if !self.repo.update_details(&product).await? {
            return Err(CatalogError::ProductNotFound);
        }

        tracing::info!(product_id = %product_id, name = %product.details.name, "Product updated");

        // Reload so a review landing meanwhile is reflected
        self.repo
            .find_by_id(&product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound)
    }
}
