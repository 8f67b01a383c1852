//! PostgreSQL Repository Implementation

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use platform::deadline::bounded;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::entity::product::{Product, ProductDetails, ProductSnapshot};
use crate::domain::entity::review::Review;
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::{AccountId, ProductId, Rating};
use crate::error::{CatalogError, CatalogResult};

const PRODUCT_COLUMNS: &str = "product_id, name, description, brand, category, image, price, \
     quantity, count_in_stock, rating, num_reviews, version, created_at, updated_at";

const REVIEW_COLUMNS: &str = "product_id, author_id, author_name, rating, comment, created_at";

/// PostgreSQL-backed product store
///
/// Reads run in a repeatable-read transaction so a product row and its
/// reviews always come from the same snapshot.
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
    store_timeout: Duration,
}

impl PgProductRepository {
    pub fn new(pool: PgPool, store_timeout: Duration) -> Self {
        Self {
            pool,
            store_timeout,
        }
    }

    async fn load(
        conn: &mut PgConnection,
        rows: Vec<ProductRow>,
    ) -> Result<Vec<ProductParts>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.product_id).collect();
        let sql = format!(
            "SELECT {REVIEW_COLUMNS} FROM product_reviews \
             WHERE product_id = ANY($1) ORDER BY created_at, review_id"
        );
        let reviews = sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(&ids)
            .fetch_all(&mut *conn)
            .await?;

        let mut by_product: HashMap<Uuid, Vec<ReviewRow>> = HashMap::new();
        for review in reviews {
            by_product.entry(review.product_id).or_default().push(review);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let reviews = by_product.remove(&row.product_id).unwrap_or_default();
                ProductParts { row, reviews }
            })
            .collect())
    }
}

impl ProductRepository for PgProductRepository {
    async fn create(&self, product: &Product) -> CatalogResult<()> {
        let details = &product.details;
        bounded(
            self.store_timeout,
            sqlx::query(
                r#"
                INSERT INTO products (
                    product_id,
                    name,
                    description,
                    brand,
                    category,
                    image,
                    price,
                    quantity,
                    count_in_stock,
                    rating,
                    num_reviews,
                    version,
                    created_at,
                    updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                "#,
            )
            .bind(product.product_id.as_uuid())
            .bind(&details.name)
            .bind(&details.description)
            .bind(&details.brand)
            .bind(&details.category)
            .bind(&details.image)
            .bind(details.price)
            .bind(details.quantity)
            .bind(details.count_in_stock)
            .bind(product.rating())
            .bind(product.num_reviews() as i32)
            .bind(product.version())
            .bind(product.created_at)
            .bind(product.updated_at)
            .execute(&self.pool),
        )
        .await??;

        Ok(())
    }

    async fn find_by_id(&self, product_id: &ProductId) -> CatalogResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = $1");
        let parts = bounded(self.store_timeout, async {
            let mut tx = self.pool.begin().await?;
            sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
                .execute(&mut *tx)
                .await?;

            let row = sqlx::query_as::<_, ProductRow>(&sql)
                .bind(product_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await?;
            let parts = Self::load(&mut *tx, row.into_iter().collect()).await?;

            tx.commit().await?;
            Ok::<_, sqlx::Error>(parts)
        })
        .await??;

        parts.into_iter().next().map(ProductParts::into_product).transpose()
    }

    async fn save_with_review(
        &self,
        product: &Product,
        review: &Review,
        expected_version: i64,
    ) -> CatalogResult<bool> {
        let applied = bounded(self.store_timeout, async {
            let mut tx = self.pool.begin().await?;

            let updated = sqlx::query(
                r#"
                UPDATE products SET
                    rating = $3,
                    num_reviews = $4,
                    version = $5,
                    updated_at = $6
                WHERE product_id = $1 AND version = $2
                "#,
            )
            .bind(product.product_id.as_uuid())
            .bind(expected_version)
            .bind(product.rating())
            .bind(product.num_reviews() as i32)
            .bind(product.version())
            .bind(product.updated_at)
            .execute(&mut *tx)
            .await?;

            if updated.rows_affected() == 0 {
                tx.rollback().await?;
                return Ok::<_, sqlx::Error>(false);
            }

            // UNIQUE (product_id, author_id): a duplicate surfaces as 23505
            sqlx::query(
                r#"
                INSERT INTO product_reviews (
                    product_id,
                    author_id,
                    author_name,
                    rating,
                    comment,
                    created_at
                ) VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(product.product_id.as_uuid())
            .bind(review.author_id.as_uuid())
            .bind(&review.author_name)
            .bind(i16::from(review.rating.value()))
            .bind(&review.comment)
            .bind(review.created_at)
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;
            Ok(true)
        })
        .await??;

        Ok(applied)
    }

    async fn update_details(&self, product: &Product) -> CatalogResult<bool> {
        let details = &product.details;
        let result = bounded(
            self.store_timeout,
            sqlx::query(
                r#"
                UPDATE products SET
                    name = $2,
                    description = $3,
                    brand = $4,
                    category = $5,
                    image = $6,
                    price = $7,
                    quantity = $8,
                    count_in_stock = $9,
                    updated_at = $10
                WHERE product_id = $1
                "#,
            )
            .bind(product.product_id.as_uuid())
            .bind(&details.name)
            .bind(&details.description)
            .bind(&details.brand)
            .bind(&details.category)
            .bind(&details.image)
            .bind(details.price)
            .bind(details.quantity)
            .bind(details.count_in_stock)
            .bind(product.updated_at)
            .execute(&self.pool),
        )
        .await??;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, product_id: &ProductId) -> CatalogResult<bool> {
        // product_reviews rows go with it (ON DELETE CASCADE)
        let result = bounded(
            self.store_timeout,
            sqlx::query("DELETE FROM products WHERE product_id = $1")
                .bind(product_id.as_uuid())
                .execute(&self.pool),
        )
        .await??;

        Ok(result.rows_affected() > 0)
    }

    async fn top_rated(&self, limit: usize) -> CatalogResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             ORDER BY rating DESC, num_reviews DESC, created_at LIMIT $1"
        );
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let parts = bounded(self.store_timeout, async {
            let mut tx = self.pool.begin().await?;
            sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
                .execute(&mut *tx)
                .await?;

            let rows = sqlx::query_as::<_, ProductRow>(&sql)
                .bind(limit)
                .fetch_all(&mut *tx)
                .await?;
            let parts = Self::load(&mut *tx, rows).await?;

            tx.commit().await?;
            Ok::<_, sqlx::Error>(parts)
        })
        .await??;

        parts.into_iter().map(ProductParts::into_product).collect()
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProductRow {
    product_id: Uuid,
    name: String,
    description: String,
    brand: String,
    category: String,
    image: String,
    price: Decimal,
    quantity: i32,
    count_in_stock: i32,
    rating: f64,
    num_reviews: i32,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    product_id: Uuid,
    author_id: Uuid,
    author_name: String,
    rating: i16,
    comment: String,
    created_at: DateTime<Utc>,
}

impl ReviewRow {
    fn into_review(self) -> CatalogResult<Review> {
        let rating = Rating::new(i64::from(self.rating)).map_err(|e| {
            CatalogError::Internal(format!("stored review rating {}: {e}", self.rating))
        })?;

        Ok(Review {
            author_id: AccountId::from_uuid(self.author_id),
            author_name: self.author_name,
            rating,
            comment: self.comment,
            created_at: self.created_at,
        })
    }
}

struct ProductParts {
    row: ProductRow,
    reviews: Vec<ReviewRow>,
}

impl ProductParts {
    fn into_product(self) -> CatalogResult<Product> {
        let row = self.row;
        let reviews = self
            .reviews
            .into_iter()
            .map(ReviewRow::into_review)
            .collect::<CatalogResult<Vec<_>>>()?;
        let num_reviews = u32::try_from(row.num_reviews).map_err(|_| {
            CatalogError::Internal(format!("stored review count {}", row.num_reviews))
        })?;

        Ok(Product::from_snapshot(ProductSnapshot {
            product_id: ProductId::from_uuid(row.product_id),
            details: ProductDetails {
                name: row.name,
                description: row.description,
                brand: row.brand,
                category: row.category,
                image: row.image,
                price: row.price,
                quantity: row.quantity,
                count_in_stock: row.count_in_stock,
            },
            reviews,
            rating: row.rating,
            num_reviews,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}
