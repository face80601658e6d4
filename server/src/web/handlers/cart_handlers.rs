// storefront_server/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use super::run_flow;
use crate::errors::AppError;
use crate::pipelines::contexts::{CartLineAction, CartLineCtxData, ReplaceCartCtxData};
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;
use storefront::{CartItem, ProductId, Shared};

/// Body of the legacy `PATCH /api/cart`.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshotPayload {
  pub email: String,
  pub shopping_cart: Vec<CartItem>,
}

#[derive(Deserialize, Debug)]
pub struct CartLinePayload {
  pub qty: u32,
}

#[instrument(
  name = "handler::replace_cart",
  skip(app_state, auth_user, req_payload),
  fields(user_id = %auth_user.user_id, lines = req_payload.shopping_cart.len())
)]
pub async fn replace_cart_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  req_payload: web::Json<CartSnapshotPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  let ctx = Shared::new(ReplaceCartCtxData {
    app_state: app_state.get_ref().clone(),
    session: auth_user.session(),
    email: payload.email,
    shopping_cart: payload.shopping_cart,
    target_user_id: None,
  });

  run_flow(&app_state, &ctx).await?;
  Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[instrument(name = "handler::get_cart", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn get_cart_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let items = app_state.users.cart(auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(json!({ "success": true, "data": items })))
}

async fn run_cart_line(
  app_state: &web::Data<AppState>,
  auth_user: &AuthenticatedUser,
  product_id: ProductId,
  action: CartLineAction,
) -> Result<HttpResponse, AppError> {
  let ctx = Shared::new(CartLineCtxData {
    app_state: app_state.get_ref().clone(),
    session: auth_user.session(),
    product_id,
    action,
    cart: None,
  });

  run_flow(app_state, &ctx).await?;

  let items = ctx.write().cart.take().unwrap_or_default();
  info!(lines = items.len(), ?action, "Cart line updated.");
  Ok(HttpResponse::Ok().json(json!({ "success": true, "data": items })))
}

#[instrument(
  name = "handler::put_cart_item",
  skip(app_state, auth_user, path, req_payload),
  fields(user_id = %auth_user.user_id, product_id = %path.as_str(), qty = req_payload.qty)
)]
pub async fn put_cart_item_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<String>,
  req_payload: web::Json<CartLinePayload>,
) -> Result<HttpResponse, AppError> {
  let action = CartLineAction::Upsert { qty: req_payload.qty };
  run_cart_line(&app_state, &auth_user, ProductId::new(path.into_inner()), action).await
}

#[instrument(
  name = "handler::delete_cart_item",
  skip(app_state, auth_user, path),
  fields(user_id = %auth_user.user_id, product_id = %path.as_str())
)]
pub async fn delete_cart_item_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  run_cart_line(&app_state, &auth_user, ProductId::new(path.into_inner()), CartLineAction::Delete).await
}

/// Any other method on `/api/cart`.
pub async fn unsupported_method_handler() -> Result<HttpResponse, AppError> {
  Err(AppError::UnsupportedMethod)
}
