// storefront_server/src/db/memory.rs

use super::{ProductCatalog, UserStore};
use crate::errors::{AppError, Result};
use crate::models::User;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use storefront::model::{cart, favourite};
use storefront::{CartItem, FavouriteItem, Product, ProductId};
use tracing::{debug, instrument};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct UserRecord {
  user: User,
  cart: Vec<CartItem>,
  favourites: Vec<FavouriteItem>,
}

/// Process-local storage. Each call takes the lock once, so every write is atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
  users: RwLock<HashMap<Uuid, UserRecord>>,
  products: RwLock<Vec<Product>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_products(products: Vec<Product>) -> Self {
    let store = Self::new();
    store.put_products(products);
    store
  }

  /// Adds or replaces catalog entries by id.
  pub fn put_products(&self, products: Vec<Product>) {
    let mut catalog = self.products.write();
    for product in products {
      match catalog.iter_mut().find(|p| p.id == product.id) {
        Some(existing) => *existing = product,
        None => catalog.push(product),
      }
    }
  }

  fn with_user<R>(&self, user_id: Uuid, f: impl FnOnce(&mut UserRecord) -> R) -> Result<R> {
    let mut users = self.users.write();
    let record = users
      .get_mut(&user_id)
      .ok_or_else(|| AppError::NotFound(format!("User {} not found.", user_id)))?;
    Ok(f(record))
  }
}

#[async_trait]
impl UserStore for MemoryStore {
  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    let email = email.to_lowercase();
    Ok(
      self
        .users
        .read()
        .values()
        .find(|r| r.user.email == email)
        .map(|r| r.user.clone()),
    )
  }

  #[instrument(name = "MemoryStore::create_user", skip(self, user), fields(email = %user.email))]
  async fn create_user(&self, user: User) -> Result<User> {
    let mut users = self.users.write();
    if users.values().any(|r| r.user.email == user.email) {
      return Err(AppError::Conflict("An account with this email already exists.".to_string()));
    }
    users.insert(
      user.id,
      UserRecord {
        user: user.clone(),
        cart: Vec::new(),
        favourites: Vec::new(),
      },
    );
    debug!(user_id = %user.id, "User stored.");
    Ok(user)
  }

  async fn cart(&self, user_id: Uuid) -> Result<Vec<CartItem>> {
    self.with_user(user_id, |r| r.cart.clone())
  }

  async fn replace_cart(&self, user_id: Uuid, items: &[CartItem]) -> Result<()> {
    self.with_user(user_id, |r| r.cart = items.to_vec())
  }

  async fn upsert_cart_line(&self, user_id: Uuid, item: &CartItem) -> Result<()> {
    self.with_user(user_id, |r| cart::upsert_line(&mut r.cart, item.clone()))
  }

  async fn delete_cart_line(&self, user_id: Uuid, product_id: &ProductId) -> Result<()> {
    self.with_user(user_id, |r| {
      cart::remove_line(&mut r.cart, product_id);
    })
  }

  async fn favourites(&self, user_id: Uuid) -> Result<Vec<FavouriteItem>> {
    self.with_user(user_id, |r| r.favourites.clone())
  }

  async fn add_favourite(&self, user_id: Uuid, product_id: &ProductId) -> Result<()> {
    self.with_user(user_id, |r| {
      favourite::insert(&mut r.favourites, product_id);
    })
  }

  async fn remove_favourite(&self, user_id: Uuid, product_id: &ProductId) -> Result<()> {
    self.with_user(user_id, |r| {
      favourite::remove(&mut r.favourites, product_id);
    })
  }

  async fn clear_favourites(&self, user_id: Uuid) -> Result<()> {
    self.with_user(user_id, |r| r.favourites.clear())
  }
}

#[async_trait]
impl ProductCatalog for MemoryStore {
  async fn list_products(&self) -> Result<Vec<Product>> {
    let mut products = self.products.read().clone();
    products.sort_by(|a, b| a.title.cmp(&b.title));
    Ok(products)
  }

  async fn find_product(&self, product_id: &ProductId) -> Result<Option<Product>> {
    Ok(self.products.read().iter().find(|p| &p.id == product_id).cloned())
  }
}
