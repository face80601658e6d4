// storefront/src/membership.rs

use crate::model::{cart, favourite, CartItem, FavouriteItem, ProductId};

/// Whether a product is currently in the cart and/or the favourite list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Membership {
  pub in_cart: bool,
  pub in_favourite: bool,
}

/// Linear scan of both lists; they stay small enough for that.
pub fn membership(product_id: &ProductId, cart_items: &[CartItem], favourites: &[FavouriteItem]) -> Membership {
  Membership {
    in_cart: cart::contains(cart_items, product_id),
    in_favourite: favourite::contains(favourites, product_id),
  }
}
