// storefront_server/src/models/cart_item.rs

use sqlx::FromRow;
use storefront::{CartItem, FavouriteItem, ProductId};

/// One `cart_items` row, read back in insertion order.
#[derive(Debug, Clone, FromRow)]
pub struct CartLineRow {
  pub product_id: String,
  pub qty: i32,
}

impl From<CartLineRow> for CartItem {
  fn from(row: CartLineRow) -> Self {
    // The column carries CHECK (qty > 0).
    CartItem {
      product_id: ProductId::new(row.product_id),
      qty: u32::try_from(row.qty).unwrap_or(1),
    }
  }
}

#[derive(Debug, Clone, FromRow)]
pub struct FavouriteRow {
  pub product_id: String,
}

impl From<FavouriteRow> for FavouriteItem {
  fn from(row: FavouriteRow) -> Self {
    FavouriteItem {
      product_id: ProductId::new(row.product_id),
    }
  }
}
