// storefront/src/store/ops.rs

//! The list mutations the store knows how to dispatch.
//!
//! Each op names the list it touches, the status slot it reports through,
//! when it would change nothing, and how it is persisted.

use super::backend::CartBackend;
use super::state::{Operation, StoreState};
use super::SyncStrategy;
use crate::error::{BackendError, StoreError};
use crate::model::{cart, favourite, CartItem, FavouriteItem, ProductId};
use async_trait::async_trait;

#[async_trait]
pub trait ListOp: Clone + Send + Sync + 'static {
  type Item: Clone + Send + Sync + 'static;

  const OPERATION: Operation;

  fn list(state: &StoreState) -> &Vec<Self::Item>;
  fn list_mut(state: &mut StoreState) -> &mut Vec<Self::Item>;

  fn validate(&self) -> Result<(), StoreError> {
    Ok(())
  }

  /// `true` when applying the op to `items` would leave them unchanged.
  fn is_noop(&self, items: &[Self::Item]) -> bool;

  fn apply(&self, items: &mut Vec<Self::Item>);

  /// Undoes this op's own change after a failed optimistic write. `previous`
  /// is the list as it was before `apply`; other ops may have changed `items`
  /// since, and their changes are kept.
  fn revert(&self, items: &mut Vec<Self::Item>, previous: &[Self::Item]);

  /// Sends the change to the backend. `next` is the full list after `apply`,
  /// computed from the store's state when the request started.
  async fn persist(
    &self,
    backend: &dyn CartBackend,
    email: &str,
    strategy: SyncStrategy,
    next: &[Self::Item],
  ) -> Result<(), BackendError>;
}

#[derive(Debug, Clone)]
pub struct AddToCart {
  pub item: CartItem,
}

#[async_trait]
impl ListOp for AddToCart {
  type Item = CartItem;
  const OPERATION: Operation = Operation::CartAdd;

  fn list(state: &StoreState) -> &Vec<CartItem> {
    &state.cart.items
  }

  fn list_mut(state: &mut StoreState) -> &mut Vec<CartItem> {
    &mut state.cart.items
  }

  fn validate(&self) -> Result<(), StoreError> {
    if self.item.qty == 0 {
      return Err(StoreError::Validation("quantity must be at least 1".to_string()));
    }
    Ok(())
  }

  // Adding a product that is already in the cart does nothing.
  fn is_noop(&self, items: &[CartItem]) -> bool {
    cart::contains(items, &self.item.product_id)
  }

  fn apply(&self, items: &mut Vec<CartItem>) {
    if !cart::contains(items, &self.item.product_id) {
      items.push(self.item.clone());
    }
  }

  fn revert(&self, items: &mut Vec<CartItem>, _previous: &[CartItem]) {
    cart::remove_line(items, &self.item.product_id);
  }

  async fn persist(
    &self,
    backend: &dyn CartBackend,
    email: &str,
    strategy: SyncStrategy,
    next: &[CartItem],
  ) -> Result<(), BackendError> {
    match strategy {
      SyncStrategy::Snapshot => backend.replace_cart(email, next).await,
      SyncStrategy::LineItem => backend.upsert_cart_line(email, &self.item).await,
    }
  }
}

#[derive(Debug, Clone)]
pub struct RemoveFromCart {
  pub product_id: ProductId,
}

#[async_trait]
impl ListOp for RemoveFromCart {
  type Item = CartItem;
  const OPERATION: Operation = Operation::CartRemove;

  fn list(state: &StoreState) -> &Vec<CartItem> {
    &state.cart.items
  }

  fn list_mut(state: &mut StoreState) -> &mut Vec<CartItem> {
    &mut state.cart.items
  }

  fn is_noop(&self, items: &[CartItem]) -> bool {
    !cart::contains(items, &self.product_id)
  }

  fn apply(&self, items: &mut Vec<CartItem>) {
    cart::remove_line(items, &self.product_id);
  }

  fn revert(&self, items: &mut Vec<CartItem>, previous: &[CartItem]) {
    restore_one(items, previous, |i| i.product_id == self.product_id);
  }

  async fn persist(
    &self,
    backend: &dyn CartBackend,
    email: &str,
    strategy: SyncStrategy,
    next: &[CartItem],
  ) -> Result<(), BackendError> {
    match strategy {
      SyncStrategy::Snapshot => backend.replace_cart(email, next).await,
      SyncStrategy::LineItem => backend.delete_cart_line(email, &self.product_id).await,
    }
  }
}

/// Puts back the entry of `previous` matching `is_target`, at its old
/// position where possible, unless `items` already has it.
fn restore_one<T: Clone>(items: &mut Vec<T>, previous: &[T], is_target: impl Fn(&T) -> bool) {
  if items.iter().any(&is_target) {
    return;
  }
  if let Some(idx) = previous.iter().position(&is_target) {
    items.insert(idx.min(items.len()), previous[idx].clone());
  }
}

// Favourites have no snapshot endpoint; they always sync per product.

#[derive(Debug, Clone)]
pub struct AddFavourite {
  pub product_id: ProductId,
}

#[async_trait]
impl ListOp for AddFavourite {
  type Item = FavouriteItem;
  const OPERATION: Operation = Operation::FavouriteAdd;

  fn list(state: &StoreState) -> &Vec<FavouriteItem> {
    &state.favourite.items
  }

  fn list_mut(state: &mut StoreState) -> &mut Vec<FavouriteItem> {
    &mut state.favourite.items
  }

  fn is_noop(&self, items: &[FavouriteItem]) -> bool {
    favourite::contains(items, &self.product_id)
  }

  fn apply(&self, items: &mut Vec<FavouriteItem>) {
    favourite::insert(items, &self.product_id);
  }

  fn revert(&self, items: &mut Vec<FavouriteItem>, _previous: &[FavouriteItem]) {
    favourite::remove(items, &self.product_id);
  }

  async fn persist(
    &self,
    backend: &dyn CartBackend,
    email: &str,
    _strategy: SyncStrategy,
    _next: &[FavouriteItem],
  ) -> Result<(), BackendError> {
    backend.add_favourite(email, &self.product_id).await
  }
}

#[derive(Debug, Clone)]
pub struct RemoveFavourite {
  pub product_id: ProductId,
}

#[async_trait]
impl ListOp for RemoveFavourite {
  type Item = FavouriteItem;
  const OPERATION: Operation = Operation::FavouriteRemove;

  fn list(state: &StoreState) -> &Vec<FavouriteItem> {
    &state.favourite.items
  }

  fn list_mut(state: &mut StoreState) -> &mut Vec<FavouriteItem> {
    &mut state.favourite.items
  }

  fn is_noop(&self, items: &[FavouriteItem]) -> bool {
    !favourite::contains(items, &self.product_id)
  }

  fn apply(&self, items: &mut Vec<FavouriteItem>) {
    favourite::remove(items, &self.product_id);
  }

  fn revert(&self, items: &mut Vec<FavouriteItem>, previous: &[FavouriteItem]) {
    restore_one(items, previous, |i| i.product_id == self.product_id);
  }

  async fn persist(
    &self,
    backend: &dyn CartBackend,
    email: &str,
    _strategy: SyncStrategy,
    _next: &[FavouriteItem],
  ) -> Result<(), BackendError> {
    backend.remove_favourite(email, &self.product_id).await
  }
}

#[derive(Debug, Clone)]
pub struct ClearFavourites;

#[async_trait]
impl ListOp for ClearFavourites {
  type Item = FavouriteItem;
  const OPERATION: Operation = Operation::FavouriteClear;

  fn list(state: &StoreState) -> &Vec<FavouriteItem> {
    &state.favourite.items
  }

  fn list_mut(state: &mut StoreState) -> &mut Vec<FavouriteItem> {
    &mut state.favourite.items
  }

  fn is_noop(&self, items: &[FavouriteItem]) -> bool {
    items.is_empty()
  }

  fn apply(&self, items: &mut Vec<FavouriteItem>) {
    items.clear();
  }

  // Cleared entries come back in their old order, ahead of anything added since.
  fn revert(&self, items: &mut Vec<FavouriteItem>, previous: &[FavouriteItem]) {
    let added: Vec<FavouriteItem> = items
      .drain(..)
      .filter(|i| !favourite::contains(previous, &i.product_id))
      .collect();
    items.extend(previous.iter().cloned());
    items.extend(added);
  }

  async fn persist(
    &self,
    backend: &dyn CartBackend,
    email: &str,
    _strategy: SyncStrategy,
    _next: &[FavouriteItem],
  ) -> Result<(), BackendError> {
    backend.clear_favourites(email).await
  }
}
