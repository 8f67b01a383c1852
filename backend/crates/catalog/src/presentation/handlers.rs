//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use identity::CurrentAccount;

use crate::application::{
    AddReviewInput, AddReviewUseCase, CatalogConfig, CreateProductUseCase, DeleteProductUseCase,
    ProductQueryUseCase, UpdateProductUseCase,
};
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::ProductId;
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{
    AddReviewRequest, MessageResponse, ProductDeletedResponse, ProductRequest, ProductResponse,
};

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogState<P>
where
    P: ProductRepository + Clone + Send + Sync + 'static,
{
    pub products: Arc<P>,
    pub config: Arc<CatalogConfig>,
}

impl<P> CatalogState<P>
where
    P: ProductRepository + Clone + Send + Sync + 'static,
{
    pub fn new(products: P, config: CatalogConfig) -> Self {
        Self {
            products: Arc::new(products),
            config: Arc::new(config),
        }
    }
}

/// POST /api/products (admin)
pub async fn create_product<P>(
    State(state): State<CatalogState<P>>,
    Json(req): Json<ProductRequest>,
) -> CatalogResult<impl IntoResponse>
where
    P: ProductRepository + Clone + Send + Sync + 'static,
{
    let product = CreateProductUseCase::new(state.products.clone())
        .execute(req.into())
        .await?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// PUT /api/products/{id} (admin)
pub async fn update_product<P>(
    State(state): State<CatalogState<P>>,
    Path(id): Path<String>,
    Json(req): Json<ProductRequest>,
) -> CatalogResult<Json<ProductResponse>>
where
    P: ProductRepository + Clone + Send + Sync + 'static,
{
    let product_id = parse_product_id(&id)?;
    let product = UpdateProductUseCase::new(state.products.clone())
        .execute(product_id, req.into())
        .await?;

    Ok(Json(ProductResponse::from(product)))
}

/// DELETE /api/products/{id} (admin)
pub async fn delete_product<P>(
    State(state): State<CatalogState<P>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<ProductDeletedResponse>>
where
    P: ProductRepository + Clone + Send + Sync + 'static,
{
    let product_id = parse_product_id(&id)?;
    let removed = DeleteProductUseCase::new(state.products.clone())
        .execute(product_id)
        .await?;

    let name = removed.details.name;
    Ok(Json(ProductDeletedResponse {
        message: format!("Product {name} has been deleted."),
        name,
    }))
}

/// GET /api/products/top
pub async fn top_products<P>(
    State(state): State<CatalogState<P>>,
) -> CatalogResult<Json<Vec<ProductResponse>>>
where
    P: ProductRepository + Clone + Send + Sync + 'static,
{
    let products = ProductQueryUseCase::new(state.products.clone(), state.config.clone())
        .top_rated()
        .await?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// GET /api/products/{id}
pub async fn get_product<P>(
    State(state): State<CatalogState<P>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<ProductResponse>>
where
    P: ProductRepository + Clone + Send + Sync + 'static,
{
    let product_id = parse_product_id(&id)?;
    let product = ProductQueryUseCase::new(state.products.clone(), state.config.clone())
        .get(product_id)
        .await?;

    Ok(Json(ProductResponse::from(product)))
}

/// POST /api/products/{id}/reviews
pub async fn add_review<P>(
    State(state): State<CatalogState<P>>,
    CurrentAccount(author): CurrentAccount,
    Path(id): Path<String>,
    Json(req): Json<AddReviewRequest>,
) -> CatalogResult<impl IntoResponse>
where
    P: ProductRepository + Clone + Send + Sync + 'static,
{
    let product_id = parse_product_id(&id)?;

    AddReviewUseCase::new(state.products.clone(), state.config.clone())
        .execute(AddReviewInput {
            product_id,
            author_id: author.account_id,
            author_name: author.display_name.as_str().to_string(),
            rating: req.rating,
            comment: req.comment,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Review added",
        }),
    ))
}

fn parse_product_id(raw: &str) -> CatalogResult<ProductId> {
    raw.parse().map_err(|_| CatalogError::InvalidProductId)
}
