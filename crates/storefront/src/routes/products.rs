//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use fernway_core::ProductId;
use fernway_core::images::{ImageTransform, transform_url};

use crate::db::products::{Product, ProductRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Listing images are requested at card width, detail images larger.
const LISTING_IMAGE_WIDTH: u32 = 480;
const DETAIL_IMAGE_WIDTH: u32 = 1200;

/// Product display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image_url: Option<String>,
}

impl ProductView {
    fn from_product(product: Product, image_width: u32) -> Self {
        Self {
            id: product.id,
            title: product.title,
            description: product.description,
            price: product.price.display(),
            image_url: product
                .image_url
                .map(|url| transform_url(&url, &ImageTransform::width(image_width))),
        }
    }
}

/// List active products.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<ProductView>>> {
    let products = ProductRepository::new(state.pool()).list_active().await?;

    Ok(Json(
        products
            .into_iter()
            .map(|p| ProductView::from_product(p, LISTING_IMAGE_WIDTH))
            .collect(),
    ))
}

/// Show one product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductView>> {
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(ProductView::from_product(product, DETAIL_IMAGE_WIDTH)))
}
