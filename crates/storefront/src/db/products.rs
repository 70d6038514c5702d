//! Catalog reads.
//!
//! The handmade catalog is small and read-heavy; the storefront only needs
//! active products for listing and detail pages.

use rust_decimal::Decimal;
use sqlx::{PgPool, Row};

use fernway_core::types::{CurrencyCode, Price, ProductId};

use super::RepositoryError;

/// A catalog product.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub image_url: Option<String>,
}

/// Repository for catalog reads.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List active products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query(
            r"
            SELECT id, title, description, price, image_url
            FROM storefront.products
            WHERE active
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(row_to_product).collect()
    }

    /// Get one product by ID (active or not).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT id, title, description, price, image_url
            FROM storefront.products
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(row_to_product).transpose()
    }
}

fn row_to_product(row: sqlx::postgres::PgRow) -> Result<Product, RepositoryError> {
    let amount: Decimal = row.try_get("price")?;

    Ok(Product {
        id: ProductId::new(row.try_get("id")?),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        price: Price::new(amount, CurrencyCode::USD),
        image_url: row.try_get("image_url")?,
    })
}
