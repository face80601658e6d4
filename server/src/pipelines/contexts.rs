// storefront_server/src/pipelines/contexts.rs

//! Context data for each request flow. Handlers receive these wrapped in
//! `storefront::Shared`.

use crate::models::User;
use crate::services::session_service::SessionUser;
use crate::state::AppState;
use storefront::{CartItem, FavouriteItem, ProductId};
use uuid::Uuid;

pub struct SignupCtxData {
  pub app_state: AppState,
  pub email: String,
  pub password: String,
  pub created_user: Option<User>,
}

pub struct SigninCtxData {
  pub app_state: AppState,
  pub email: String,
  pub password: String,
  pub user: Option<User>,
  pub session_token: Option<String>,
}

/// Legacy `PATCH /api/cart`: overwrite the cart of the user named by `email`.
pub struct ReplaceCartCtxData {
  pub app_state: AppState,
  pub session: SessionUser,
  pub email: String,
  pub shopping_cart: Vec<CartItem>,
  pub target_user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartLineAction {
  Upsert { qty: u32 },
  Delete,
}

pub struct CartLineCtxData {
  pub app_state: AppState,
  pub session: SessionUser,
  pub product_id: ProductId,
  pub action: CartLineAction,
  /// The user's cart after the change.
  pub cart: Option<Vec<CartItem>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavouriteAction {
  Add(ProductId),
  Remove(ProductId),
  Clear,
}

pub struct FavouriteCtxData {
  pub app_state: AppState,
  pub session: SessionUser,
  pub action: FavouriteAction,
  pub favourites: Option<Vec<FavouriteItem>>,
}
