// storefront_server/src/db/postgres.rs

use super::{ProductCatalog, UserStore};
use crate::errors::{AppError, Result};
use crate::models::{CartLineRow, FavouriteRow, ProductRow, User};
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use storefront::{CartItem, FavouriteItem, Product, ProductId};
use tracing::{error, info, instrument};
use uuid::Uuid;

const SCHEMA: &str = include_str!("../../schema.sql");

/// Postgres-backed storage using runtime-checked queries.
#[derive(Debug, Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  pub async fn connect(database_url: &str) -> Result<Self> {
    let pool = PgPool::connect(database_url).await.map_err(|e| {
      error!(error = %e, "Failed to connect to the database.");
      AppError::Sqlx(e)
    })?;
    info!("Successfully connected to the database.");
    Ok(Self::new(pool))
  }

  pub async fn ensure_schema(&self) -> Result<()> {
    sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
    info!("Database schema is in place.");
    Ok(())
  }

  /// Inserts catalog entries, leaving existing ids untouched.
  pub async fn insert_products(&self, products: &[Product]) -> Result<()> {
    let mut tx = self.pool.begin().await?;
    for product in products {
      sqlx::query(
        "INSERT INTO products (id, title, price_cents, brand, category, images, description) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) ON CONFLICT (id) DO NOTHING",
      )
      .bind(product.id.as_str())
      .bind(&product.title)
      .bind(product.price_cents)
      .bind(&product.brand)
      .bind(&product.category)
      .bind(Json(&product.images))
      .bind(&product.description)
      .execute(&mut *tx)
      .await?;
    }
    tx.commit().await?;
    Ok(())
  }
}

fn qty_param(item: &CartItem) -> Result<i32> {
  i32::try_from(item.qty).map_err(|_| AppError::Validation("quantity is too large".to_string()))
}

fn unique_violation(err: &sqlx::Error) -> bool {
  matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl UserStore for PgStore {
  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT id, email, password_hash, created_at FROM users WHERE email = $1")
      .bind(email.to_lowercase())
      .fetch_optional(&self.pool)
      .await?;
    Ok(user)
  }

  #[instrument(name = "PgStore::create_user", skip(self, user), fields(email = %user.email))]
  async fn create_user(&self, user: User) -> Result<User> {
    sqlx::query_as::<_, User>(
      "INSERT INTO users (id, email, password_hash, created_at) VALUES ($1, $2, $3, $4) \
       RETURNING id, email, password_hash, created_at",
    )
    .bind(user.id)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.created_at)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      if unique_violation(&e) {
        AppError::Conflict("An account with this email already exists.".to_string())
      } else {
        AppError::Sqlx(e)
      }
    })
  }

  async fn cart(&self, user_id: Uuid) -> Result<Vec<CartItem>> {
    let rows = sqlx::query_as::<_, CartLineRow>(
      "SELECT product_id, qty FROM cart_items WHERE user_id = $1 ORDER BY position ASC",
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;
    Ok(rows.into_iter().map(CartItem::from).collect())
  }

  #[instrument(name = "PgStore::replace_cart", skip(self, items), fields(lines = items.len()))]
  async fn replace_cart(&self, user_id: Uuid, items: &[CartItem]) -> Result<()> {
    let mut tx = self.pool.begin().await?;
    sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
      .bind(user_id)
      .execute(&mut *tx)
      .await?;
    for item in items {
      sqlx::query("INSERT INTO cart_items (user_id, product_id, qty) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(item.product_id.as_str())
        .bind(qty_param(item)?)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
  }

  async fn upsert_cart_line(&self, user_id: Uuid, item: &CartItem) -> Result<()> {
    sqlx::query(
      "INSERT INTO cart_items (user_id, product_id, qty) VALUES ($1, $2, $3) \
       ON CONFLICT (user_id, product_id) DO UPDATE SET qty = EXCLUDED.qty",
    )
    .bind(user_id)
    .bind(item.product_id.as_str())
    .bind(qty_param(item)?)
    .execute(&self.pool)
    .await?;
    Ok(())
  }

  async fn delete_cart_line(&self, user_id: Uuid, product_id: &ProductId) -> Result<()> {
    sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND product_id = $2")
      .bind(user_id)
      .bind(product_id.as_str())
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  async fn favourites(&self, user_id: Uuid) -> Result<Vec<FavouriteItem>> {
    let rows = sqlx::query_as::<_, FavouriteRow>(
      "SELECT product_id FROM favourites WHERE user_id = $1 ORDER BY position ASC",
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;
    Ok(rows.into_iter().map(FavouriteItem::from).collect())
  }

  async fn add_favourite(&self, user_id: Uuid, product_id: &ProductId) -> Result<()> {
    sqlx::query("INSERT INTO favourites (user_id, product_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
      .bind(user_id)
      .bind(product_id.as_str())
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  async fn remove_favourite(&self, user_id: Uuid, product_id: &ProductId) -> Result<()> {
    sqlx::query("DELETE FROM favourites WHERE user_id = $1 AND product_id = $2")
      .bind(user_id)
      .bind(product_id.as_str())
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  async fn clear_favourites(&self, user_id: Uuid) -> Result<()> {
    sqlx::query("DELETE FROM favourites WHERE user_id = $1")
      .bind(user_id)
      .execute(&self.pool)
      .await?;
    Ok(())
  }
}

#[async_trait]
impl ProductCatalog for PgStore {
  async fn list_products(&self) -> Result<Vec<Product>> {
    let rows = sqlx::query_as::<_, ProductRow>(
      "SELECT id, title, price_cents, brand, category, images, description FROM products ORDER BY title ASC",
    )
    .fetch_all(&self.pool)
    .await?;
    Ok(rows.into_iter().map(Product::from).collect())
  }

  async fn find_product(&self, product_id: &ProductId) -> Result<Option<Product>> {
    let row = sqlx::query_as::<_, ProductRow>(
      "SELECT id, title, price_cents, brand, category, images, description FROM products WHERE id = $1",
    )
    .bind(product_id.as_str())
    .fetch_optional(&self.pool)
    .await?;
    Ok(row.map(Product::from))
  }
}
