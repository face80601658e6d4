// storefront_server/src/web/handlers/favourite_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;

use super::run_flow;
use crate::errors::AppError;
use crate::pipelines::contexts::{FavouriteAction, FavouriteCtxData};
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;
use storefront::{ProductId, Shared};

async fn run_favourites(
  app_state: &web::Data<AppState>,
  auth_user: &AuthenticatedUser,
  action: FavouriteAction,
) -> Result<HttpResponse, AppError> {
  let ctx = Shared::new(FavouriteCtxData {
    app_state: app_state.get_ref().clone(),
    session: auth_user.session(),
    action,
    favourites: None,
  });

  run_flow(app_state, &ctx).await?;

  let favourites = ctx.write().favourites.take().unwrap_or_default();
  Ok(HttpResponse::Ok().json(json!({ "success": true, "data": favourites })))
}

#[instrument(name = "handler::get_favourites", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn get_favourites_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let favourites = app_state.users.favourites(auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(json!({ "success": true, "data": favourites })))
}

#[instrument(name = "handler::put_favourite", skip(app_state, auth_user, path), fields(user_id = %auth_user.user_id))]
pub async fn put_favourite_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let action = FavouriteAction::Add(ProductId::new(path.into_inner()));
  run_favourites(&app_state, &auth_user, action).await
}

#[instrument(name = "handler::delete_favourite", skip(app_state, auth_user, path), fields(user_id = %auth_user.user_id))]
pub async fn delete_favourite_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let action = FavouriteAction::Remove(ProductId::new(path.into_inner()));
  run_favourites(&app_state, &auth_user, action).await
}

#[instrument(name = "handler::clear_favourites", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn clear_favourites_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  run_favourites(&app_state, &auth_user, FavouriteAction::Clear).await
}
