// storefront/src/model/cart.rs

//! Cart lines and the list operations both the client store and the server
//! apply to them. Every operation here keeps at most one line per product.

use super::product::ProductId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
  pub product_id: ProductId,
  pub qty: u32,
}

impl CartItem {
  pub fn new(product_id: impl Into<ProductId>, qty: u32) -> Self {
    Self {
      product_id: product_id.into(),
      qty,
    }
  }
}

/// Why a submitted cart list was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartViolation {
  ZeroQuantity(ProductId),
  DuplicateProduct(ProductId),
}

impl std::fmt::Display for CartViolation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      CartViolation::ZeroQuantity(id) => write!(f, "quantity for product {} must be at least 1", id),
      CartViolation::DuplicateProduct(id) => write!(f, "product {} appears more than once", id),
    }
  }
}

pub fn contains(items: &[CartItem], product_id: &ProductId) -> bool {
  items.iter().any(|i| &i.product_id == product_id)
}

/// Checks a full cart snapshot: positive quantities, one line per product.
pub fn validate_snapshot(items: &[CartItem]) -> Result<(), CartViolation> {
  let mut seen = HashSet::with_capacity(items.len());
  for item in items {
    if item.qty == 0 {
      return Err(CartViolation::ZeroQuantity(item.product_id.clone()));
    }
    if !seen.insert(&item.product_id) {
      return Err(CartViolation::DuplicateProduct(item.product_id.clone()));
    }
  }
  Ok(())
}

/// Sets the line for `item.product_id` to `item.qty`, appending it if absent.
/// Applying the same upsert twice leaves the list as after the first.
pub fn upsert_line(items: &mut Vec<CartItem>, item: CartItem) {
  match items.iter_mut().find(|i| i.product_id == item.product_id) {
    Some(existing) => existing.qty = item.qty,
    None => items.push(item),
  }
}

/// Removes the line for `product_id`. Returns whether a line was removed.
pub fn remove_line(items: &mut Vec<CartItem>, product_id: &ProductId) -> bool {
  let before = items.len();
  items.retain(|i| &i.product_id != product_id);
  items.len() != before
}

pub fn total_quantity(items: &[CartItem]) -> u64 {
  items.iter().map(|i| u64::from(i.qty)).sum()
}
