//! Create Product Use Case (admin)

use std::sync::Arc;

use kernel::validation::ValidationErrors;
use rust_decimal::Decimal;

use crate::domain::entity::product::{Product, ProductDetails};
use crate::domain::repository::ProductRepository;
use crate::error::CatalogResult;

/// Raw admin input for creating or revising a product
///
/// Every field is checked and all problems are reported together.
#[derive(Debug, Default)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub brand: String,
    pub category: String,
    pub image: String,
    pub price: Option<Decimal>,
    pub quantity: Option<i64>,
    pub count_in_stock: Option<i64>,
}

impl ProductInput {
    pub(crate) fn validate(self) -> Result<ProductDetails, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let required = [
            ("image", &self.image, "Image is required"),
            ("name", &self.name, "Name is required"),
            ("description", &self.description, "Description is required"),
            ("category", &self.category, "Category is required"),
            ("brand", &self.brand, "Brand is required"),
        ];
        for (field, value, message) in required {
            errors.check(!value.trim().is_empty(), field, message);
        }

        let price = self.price.filter(|p| p.is_sign_positive() && !p.is_zero());
        errors.check(price.is_some(), "price", "Price should be a positive number");

        let quantity = positive_i32(self.quantity, 1);
        errors.check(
            quantity.is_some(),
            "quantity",
            "Quantity should be a positive number",
        );

        let count_in_stock = positive_i32(self.count_in_stock, 0);
        errors.check(
            count_in_stock.is_some(),
            "countInStock",
            "Count in stock is required",
        );

        match (price, quantity, count_in_stock) {
            (Some(price), Some(quantity), Some(count_in_stock)) if errors.is_empty() => {
                Ok(ProductDetails {
                    name: self.name.trim().to_string(),
                    description: self.description.trim().to_string(),
                    brand: self.brand.trim().to_string(),
                    category: self.category.trim().to_string(),
                    image: self.image.trim().to_string(),
                    price,
                    quantity,
                    count_in_stock,
                })
            }
            _ => Err(errors),
        }
    }
}

/// `value >= min`, and small enough for the store's integer column
fn positive_i32(value: Option<i64>, min: i64) -> Option<i32> {
    value
        .filter(|v| *v >= min)
        .and_then(|v| i32::try_from(v).ok())
}

pub struct CreateProductUseCase<P>
where
    P: ProductRepository,
{
    repo: Arc<P>,
}

impl<P> CreateProductUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: ProductInput) -> CatalogResult<Product> {
        let details = input.validate()?;
        let product = Product::new(details);

        self.repo.create(&product).await?;

        tracing::info!(product_id = %product.product_id, name = %product.details.name, "Product created");

        Ok(product)
    }
}
