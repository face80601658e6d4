// storefront_server/src/pipelines/cart_pipeline.rs

//! Cart persistence flows.
//!
//! `ReplaceCartCtxData` backs the legacy `PATCH /api/cart`: the body carries
//! the whole cart and overwrites whatever is stored, so two clients writing
//! from stale copies race and the last one wins. `CartLineCtxData` backs the
//! per-product endpoints, which touch a single row and are safe to repeat.

use crate::errors::AppError;
use crate::pipelines::contexts::{CartLineAction, CartLineCtxData, ReplaceCartCtxData};
use storefront::model::cart;
use storefront::{CartItem, Flow, FlowControl, FlowRegistry, Shared, StepDef};
use tracing::{debug, info, instrument, warn};

pub fn register_replace_cart_flow(registry: &FlowRegistry<AppError>) {
  let mut flow = Flow::<ReplaceCartCtxData, AppError>::required(
    "replace_cart",
    &["validate_snapshot", "resolve_target_user", "write_snapshot"],
  );
  flow.on("validate_snapshot", validate_snapshot);
  flow.on("resolve_target_user", resolve_target_user);
  flow.on("write_snapshot", write_snapshot);

  registry.register(flow);
  tracing::info!("Replace-cart flow registered.");
}

async fn validate_snapshot(ctx_data: Shared<ReplaceCartCtxData>) -> Result<FlowControl, AppError> {
  let verdict = cart::validate_snapshot(&ctx_data.read().shopping_cart);
  verdict.map_err(|violation| AppError::Validation(violation.to_string()))?;
  Ok(FlowControl::Continue)
}

/// The body names the user by email. It must be the signed-in user, and must exist.
async fn resolve_target_user(ctx_data: Shared<ReplaceCartCtxData>) -> Result<FlowControl, AppError> {
  let (email_val, session, users) = {
    let guard = ctx_data.read();
    (
      guard.email.trim().to_lowercase(),
      guard.session.clone(),
      guard.app_state.users.clone(),
    )
  };

  if email_val != session.email {
    warn!(session_user = %session.user_id, "Cart update names a different user.");
    return Err(AppError::UnknownUser);
  }

  match users.find_user_by_email(&email_val).await? {
    Some(user) => {
      ctx_data.write().target_user_id = Some(user.id);
      Ok(FlowControl::Continue)
    }
    None => {
      warn!("Cart update for unknown email: {}", email_val);
      Err(AppError::UnknownUser)
    }
  }
}

#[instrument(name = "cart_flow::write_snapshot", skip(ctx_data), err(Display))]
async fn write_snapshot(ctx_data: Shared<ReplaceCartCtxData>) -> Result<FlowControl, AppError> {
  let (user_id, items, users) = {
    let guard = ctx_data.read();
    (guard.target_user_id, guard.shopping_cart.clone(), guard.app_state.users.clone())
  };
  let user_id = user_id.ok_or_else(|| AppError::Internal("Target user unresolved.".to_string()))?;

  users.replace_cart(user_id, &items).await?;
  info!(user_id = %user_id, lines = items.len(), "Cart snapshot stored.");
  Ok(FlowControl::Continue)
}

pub fn register_cart_line_flow(registry: &FlowRegistry<AppError>) {
  let mut flow = Flow::<CartLineCtxData, AppError>::new(
    "cart_line",
    [
      StepDef::required("validate_line"),
      StepDef::required("check_product")
        .skip_if(|ctx: &Shared<CartLineCtxData>| ctx.read().action == CartLineAction::Delete),
      StepDef::required("write_line"),
      StepDef::required("load_cart"),
    ],
  );
  flow.on("validate_line", validate_line);
  flow.on("check_product", check_product);
  flow.on("write_line", write_line);
  flow.on("load_cart", load_cart);

  registry.register(flow);
  tracing::info!("Cart line flow registered.");
}

async fn validate_line(ctx_data: Shared<CartLineCtxData>) -> Result<FlowControl, AppError> {
  if let CartLineAction::Upsert { qty: 0 } = ctx_data.read().action {
    return Err(AppError::Validation("quantity must be at least 1".to_string()));
  }
  Ok(FlowControl::Continue)
}

/// Deleting an unknown product is harmless, so only upserts look the product up.
async fn check_product(ctx_data: Shared<CartLineCtxData>) -> Result<FlowControl, AppError> {
  let (product_id, catalog) = {
    let guard = ctx_data.read();
    (guard.product_id.clone(), guard.app_state.catalog.clone())
  };
  if catalog.find_product(&product_id).await?.is_none() {
    return Err(AppError::NotFound(format!("Product {} not found.", product_id)));
  }
  Ok(FlowControl::Continue)
}

async fn write_line(ctx_data: Shared<CartLineCtxData>) -> Result<FlowControl, AppError> {
  let (user_id, product_id, action, users) = {
    let guard = ctx_data.read();
    (
      guard.session.user_id,
      guard.product_id.clone(),
      guard.action,
      guard.app_state.users.clone(),
    )
  };

  match action {
    CartLineAction::Upsert { qty } => {
      users.upsert_cart_line(user_id, &CartItem { product_id, qty }).await?;
    }
    CartLineAction::Delete => {
      users.delete_cart_line(user_id, &product_id).await?;
    }
  }
  debug!(user_id = %user_id, ?action, "Cart line written.");
  Ok(FlowControl::Continue)
}

async fn load_cart(ctx_data: Shared<CartLineCtxData>) -> Result<FlowControl, AppError> {
  let (user_id, users) = {
    let guard = ctx_data.read();
    (guard.session.user_id, guard.app_state.users.clone())
  };
  let items = users.cart(user_id).await?;
  ctx_data.write().cart = Some(items);
  Ok(FlowControl::Continue)
}
