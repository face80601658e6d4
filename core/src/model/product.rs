// storefront/src/model/product.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog identifier of a product. Opaque to the store; compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
  pub fn new(id: impl Into<String>) -> Self {
    ProductId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ProductId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for ProductId {
  fn from(s: &str) -> Self {
    ProductId(s.to_string())
  }
}

impl From<String> for ProductId {
  fn from(s: String) -> Self {
    ProductId(s)
  }
}

/// A catalog entry. Read-only from the storefront's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: ProductId,
  pub title: String,
  pub price_cents: i64,
  pub brand: String,
  pub category: String,
  #[serde(default)]
  pub images: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}
