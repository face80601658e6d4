// storefront_server/src/db/seed.rs

//! Demo data loaded when `SEED_DB=true`.

use super::UserStore;
use crate::errors::{AppError, Result};
use crate::models::User;
use crate::services::auth_service;
use storefront::{Product, ProductId};
use tracing::info;

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "demo1234";

fn product(id: &str, title: &str, price_cents: i64, brand: &str, category: &str) -> Product {
  Product {
    id: ProductId::new(id),
    title: title.to_string(),
    price_cents,
    brand: brand.to_string(),
    category: category.to_string(),
    images: vec![format!("/images/{}.jpg", id)],
    description: None,
  }
}

pub fn demo_products() -> Vec<Product> {
  vec![
    product("p-100", "Canvas Tote Bag", 1_999, "Harbor", "bags"),
    product("p-101", "Ceramic Pour-Over Set", 4_450, "Kiln & Co", "kitchen"),
    product("p-102", "Merino Beanie", 2_800, "Northloop", "accessories"),
    product("p-103", "Linen Apron", 3_200, "Harbor", "kitchen"),
    product("p-104", "Trail Water Bottle", 2_499, "Summit", "outdoor"),
    product("p-105", "Wool Throw Blanket", 8_900, "Northloop", "home"),
  ]
}

/// Creates the demo account unless it already exists.
pub async fn seed_demo_user(users: &dyn UserStore) -> Result<()> {
  if users.find_user_by_email(DEMO_EMAIL).await?.is_some() {
    return Ok(());
  }
  let hash = auth_service::hash_password(DEMO_PASSWORD)?;
  match users.create_user(User::new(DEMO_EMAIL, hash)).await {
    Ok(user) => {
      info!(user_id = %user.id, "Demo user seeded.");
      Ok(())
    }
    // Another worker got there first.
    Err(AppError::Conflict(_)) => Ok(()),
    Err(e) => Err(e),
  }
}
