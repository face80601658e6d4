// storefront/src/model/favourite.rs

use super::product::ProductId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteItem {
  pub product_id: ProductId,
}

impl FavouriteItem {
  pub fn new(product_id: impl Into<ProductId>) -> Self {
    Self {
      product_id: product_id.into(),
    }
  }
}

pub fn contains(items: &[FavouriteItem], product_id: &ProductId) -> bool {
  items.iter().any(|i| &i.product_id == product_id)
}

/// Appends `product_id` unless already present. Returns whether it was added.
pub fn insert(items: &mut Vec<FavouriteItem>, product_id: &ProductId) -> bool {
  if contains(items, product_id) {
    return false;
  }
  items.push(FavouriteItem::new(product_id.clone()));
  true
}

pub fn remove(items: &mut Vec<FavouriteItem>, product_id: &ProductId) -> bool {
  let before = items.len();
  items.retain(|i| &i.product_id != product_id);
  items.len() != before
}
