// tests/common/mod.rs
#![allow(dead_code)]

use actix_web::http::header;
use std::sync::Arc;
use storefront_server::db::{seed, MemoryStore, UserStore};
use storefront_server::models::User;
use storefront_server::services::auth_service;
use storefront_server::{AppConfig, AppState};
use uuid::Uuid;

pub const JANE: &str = "jane@example.com";
pub const PASSWORD: &str = "secret1";

/// Fresh in-memory state with the demo catalog loaded.
pub fn test_state() -> (AppState, Arc<MemoryStore>) {
  let store = Arc::new(MemoryStore::with_products(seed::demo_products()));
  let state = AppState::in_memory(store.clone(), AppConfig::default());
  (state, store)
}

/// Creates `email` directly in the store and issues it a session token.
pub async fn signed_in_user(state: &AppState, email: &str) -> (Uuid, String) {
  let hash = auth_service::hash_password(PASSWORD).expect("hash");
  let user = state.users.create_user(User::new(email, hash)).await.expect("create user");
  let token = state.sessions.issue(user.id, &user.email);
  (user.id, token)
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
  (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// `init_service` over the real route table with `$state` as app data.
macro_rules! test_app {
  ($state:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($state.clone()))
        .configure(storefront_server::configure_app_routes),
    )
    .await
  };
}

pub async fn stored_cart(store: &MemoryStore, user_id: Uuid) -> Vec<storefront::CartItem> {
  store.cart(user_id).await.expect("cart")
}
