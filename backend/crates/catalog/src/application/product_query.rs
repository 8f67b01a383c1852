//! Product read queries

use std::sync::Arc;

use crate::application::config::CatalogConfig;
use crate::domain::entity::product::Product;
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::ProductId;
use crate::error::{CatalogError, CatalogResult};

pub struct ProductQueryUseCase<P>
where
    P: ProductRepository,
{
    repo: Arc<P>,
    config: Arc<CatalogConfig>,
}

impl<P> ProductQueryUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(repo: Arc<P>, config: Arc<CatalogConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn get(&self, product_id: ProductId) -> CatalogResult<Product> {
        self.repo
            .find_by_id(&product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound)
    }

    pub async fn top_rated(&self) -> CatalogResult<Vec<Product>> {
        self.repo.top_rated(self.config.top_rated_limit).await
    }
}
