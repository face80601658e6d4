// storefront/src/store/backend.rs

//! The remote side of the store: where cart and favourite changes are persisted.

use crate::error::{BackendError, ErrorKind};
use crate::model::{cart, favourite, CartItem, FavouriteItem, ProductId};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, instrument, warn};

/// Persistence endpoint used by the store's action flows.
///
/// `replace_cart` is the snapshot-overwrite contract; the line-item methods
/// are idempotent and addressed by product id.
#[async_trait]
pub trait CartBackend: Send + Sync {
  async fn fetch_cart(&self, email: &str) -> Result<Vec<CartItem>, BackendError>;
  async fn replace_cart(&self, email: &str, items: &[CartItem]) -> Result<(), BackendError>;
  async fn upsert_cart_line(&self, email: &str, item: &CartItem) -> Result<(), BackendError>;
  async fn delete_cart_line(&self, email: &str, product_id: &ProductId) -> Result<(), BackendError>;

  async fn fetch_favourites(&self, email: &str) -> Result<Vec<FavouriteItem>, BackendError>;
  async fn add_favourite(&self, email: &str, product_id: &ProductId) -> Result<(), BackendError>;
  async fn remove_favourite(&self, email: &str, product_id: &ProductId) -> Result<(), BackendError>;
  async fn clear_favourites(&self, email: &str) -> Result<(), BackendError>;
}

#[derive(Debug, Default, Clone)]
struct UserLists {
  cart: Vec<CartItem>,
  favourites: Vec<FavouriteItem>,
}

/// In-process backend keyed by user email.
///
/// Unknown users are refused with `ErrorKind::Unauthorized`, matching the
/// API's answer for an unknown email. `fail_with` makes every mutating call
/// fail until cleared.
#[derive(Debug, Default)]
pub struct MemoryBackend {
  users: RwLock<HashMap<String, UserLists>>,
  failure: RwLock<Option<ErrorKind>>,
  mutations: AtomicUsize,
}

impl MemoryBackend {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register_user(&self, email: &str) {
    self.users.write().entry(email.to_string()).or_default();
  }

  pub fn fail_with(&self, kind: Option<ErrorKind>) {
    *self.failure.write() = kind;
  }

  /// Number of mutating calls received, successful or not.
  pub fn mutation_count(&self) -> usize {
    self.mutations.load(Ordering::SeqCst)
  }

  pub fn cart_of(&self, email: &str) -> Option<Vec<CartItem>> {
    self.users.read().get(email).map(|u| u.cart.clone())
  }

  pub fn favourites_of(&self, email: &str) -> Option<Vec<FavouriteItem>> {
    self.users.read().get(email).map(|u| u.favourites.clone())
  }

  fn mutate<R>(&self, email: &str, f: impl FnOnce(&mut UserLists) -> R) -> Result<R, BackendError> {
    self.mutations.fetch_add(1, Ordering::SeqCst);
    if let Some(kind) = *self.failure.read() {
      warn!(%email, %kind, "MemoryBackend: injected failure.");
      return Err(BackendError::new(kind, "injected failure"));
    }
    let mut users = self.users.write();
    let lists = users
      .get_mut(email)
      .ok_or_else(|| BackendError::new(ErrorKind::Unauthorized, "Something went wrong"))?;
    Ok(f(lists))
  }

  fn read<R>(&self, email: &str, f: impl FnOnce(&UserLists) -> R) -> Result<R, BackendError> {
    let users = self.users.read();
    let lists = users
      .get(email)
      .ok_or_else(|| BackendError::new(ErrorKind::Unauthorized, "Something went wrong"))?;
    Ok(f(lists))
  }
}

#[async_trait]
impl CartBackend for MemoryBackend {
  async fn fetch_cart(&self, email: &str) -> Result<Vec<CartItem>, BackendError> {
    self.read(email, |u| u.cart.clone())
  }

  #[instrument(name = "MemoryBackend::replace_cart", skip(self, items), fields(lines = items.len()), err(Display))]
  async fn replace_cart(&self, email: &str, items: &[CartItem]) -> Result<(), BackendError> {
    cart::validate_snapshot(items).map_err(|v| BackendError::new(ErrorKind::Invalid, v.to_string()))?;
    self.mutate(email, |u| u.cart = items.to_vec())?;
    debug!("Cart snapshot replaced.");
    Ok(())
  }

  async fn upsert_cart_line(&self, email: &str, item: &CartItem) -> Result<(), BackendError> {
    if item.qty == 0 {
      return Err(BackendError::new(ErrorKind::Invalid, "quantity must be at least 1"));
    }
    self.mutate(email, |u| cart::upsert_line(&mut u.cart, item.clone()))
  }

  async fn delete_cart_line(&self, email: &str, product_id: &ProductId) -> Result<(), BackendError> {
    self.mutate(email, |u| {
      cart::remove_line(&mut u.cart, product_id);
    })
  }

  async fn fetch_favourites(&self, email: &str) -> Result<Vec<FavouriteItem>, BackendError> {
    self.read(email, |u| u.favourites.clone())
  }

  async fn add_favourite(&self, email: &str, product_id: &ProductId) -> Result<(), BackendError> {
    self.mutate(email, |u| {
      favourite::insert(&mut u.favourites, product_id);
    })
  }

  async fn remove_favourite(&self, email: &str, product_id: &ProductId) -> Result<(), BackendError> {
    self.mutate(email, |u| {
      favourite::remove(&mut u.favourites, product_id);
    })
  }

  async fn clear_favourites(&self, email: &str) -> Result<(), BackendError> {
    self.mutate(email, |u| u.favourites.clear())
  }
}
