//! In-memory product store
//!
//! The version comparison and the write share one write lock, which gives
//! the same compare-and-swap guarantee as the conditional UPDATE.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::{product::Product, review::Review};
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::ProductId;
use crate::error::{CatalogError, CatalogResult};

#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: &Product) -> CatalogResult<()> {
        self.products
            .write()
            .await
            .insert(product.product_id, product.clone());
        Ok(())
    }

    async fn find_by_id(&self, product_id: &ProductId) -> CatalogResult<Option<Product>> {
        Ok(self.products.read().await.get(product_id).cloned())
    }

    async fn save_with_review(
        &self,
        product: &Product,
        review: &Review,
        expected_version: i64,
    ) -> CatalogResult<bool> {
        let mut products = self.products.write().await;
        let Some(stored) = products.get_mut(&product.product_id) else {
            return Err(CatalogError::ProductNotFound);
        };

        if stored.version() != expected_version {
            return Ok(false);
        }

        // Applied to the stored copy so concurrent detail edits survive;
        // a duplicate author mirrors UNIQUE (product_id, author_id)
        stored.add_review(review.clone())?;
        Ok(true)
    }

    async fn update_details(&self, product: &Product) -> CatalogResult<bool> {
        let mut products = self.products.write().await;
        let Some(stored) = products.get_mut(&product.product_id) else {
            return Ok(false);
        };

        stored.details = product.details.clone();
        stored.updated_at = product.updated_at;
        Ok(true)
    }

    async fn delete_by_id(&self, product_id: &ProductId) -> CatalogResult<bool> {
        Ok(self.products.write().await.remove(product_id).is_some())
    }

    async fn top_rated(&self, limit: usize) -> CatalogResult<Vec<Product>> {
        let products = self.products.read().await;
        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by(|a, b| {
            b.rating()
                .total_cmp(&a.rating())
                .then_with(|| b.num_reviews().cmp(&a.num_reviews()))
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        all.truncate(limit);
        Ok(all)
    }
}
