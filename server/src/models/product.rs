// storefront_server/src/models/product.rs

use sqlx::types::Json;
use sqlx::FromRow;
use storefront::{Product, ProductId};

#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
  pub id: String,
  pub title: String,
  pub price_cents: i64,
  pub brand: String,
  pub category: String,
  pub images: Json<Vec<String>>,
  pub description: Option<String>,
}

impl From<ProductRow> for Product {
  fn from(row: ProductRow) -> Self {
    Product {
      id: ProductId::new(row.id),
      title: row.title,
      price_cents: row.price_cents,
      brand: row.brand,
      category: row.category,
      images: row.images.0,
      description: row.description,
    }
  }
}
