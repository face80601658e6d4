// storefront_server/src/db/mod.rs

//! Storage behind the API: users with their carts and favourites, and the
//! product catalog. `MemoryStore` serves tests and local runs; `PgStore`
//! is used whenever `DATABASE_URL` is set.

pub mod memory;
pub mod postgres;
pub mod seed;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::errors::Result;
use crate::models::User;
use async_trait::async_trait;
use storefront::{CartItem, FavouriteItem, Product, ProductId};
use uuid::Uuid;

#[async_trait]
pub trait UserStore: Send + Sync {
  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

  /// Inserts `user`; an email that is already taken is `AppError::Conflict`.
  async fn create_user(&self, user: User) -> Result<User>;

  async fn cart(&self, user_id: Uuid) -> Result<Vec<CartItem>>;

  /// Overwrites the whole stored cart. No version check: the last write wins.
  async fn replace_cart(&self, user_id: Uuid, items: &[CartItem]) -> Result<()>;

  /// Inserts the line or sets its quantity.
  async fn upsert_cart_line(&self, user_id: Uuid, item: &CartItem) -> Result<()>;

  /// Removes the line if present.
  async fn delete_cart_line(&self, user_id: Uuid, product_id: &ProductId) -> Result<()>;

  async fn favourites(&self, user_id: Uuid) -> Result<Vec<FavouriteItem>>;
  async fn add_favourite(&self, user_id: Uuid, product_id: &ProductId) -> Result<()>;
  async fn remove_favourite(&self, user_id: Uuid, product_id: &ProductId) -> Result<()>;
  async fn clear_favourites(&self, user_id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait ProductCatalog: Send + Sync {
  /// All products ordered by title.
  async fn list_products(&self) -> Result<Vec<Product>>;
  async fn find_product(&self, product_id: &ProductId) -> Result<Option<Product>>;
}
