// storefront_server/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use super::run_flow;
use crate::errors::AppError;
use crate::pipelines::contexts::{SigninCtxData, SignupCtxData};
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;
use storefront::Shared;

#[derive(Deserialize, Debug)]
pub struct CredentialsPayload {
  pub email: String,
  pub password: String,
}

#[instrument(name = "handler::signup", skip(app_state, req_payload), fields(req_email = %req_payload.email))]
pub async fn signup_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<CredentialsPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  let ctx = Shared::new(SignupCtxData {
    app_state: app_state.get_ref().clone(),
    email: payload.email,
    password: payload.password,
    created_user: None,
  });

  run_flow(&app_state, &ctx).await?;

  let user = ctx
    .write()
    .created_user
    .take()
    .ok_or_else(|| AppError::Internal("Signup completed without creating a user.".to_string()))?;
  info!(user_id = %user.id, "Signup successful.");

  Ok(HttpResponse::Created().json(json!({
      "success": true,
      "data": user,
  })))
}

#[instrument(name = "handler::signin", skip(app_state, req_payload), fields(req_email = %req_payload.email))]
pub async fn signin_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<CredentialsPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  let ctx = Shared::new(SigninCtxData {
    app_state: app_state.get_ref().clone(),
    email: payload.email,
    password: payload.password,
    user: None,
    session_token: None,
  });

  run_flow(&app_state, &ctx).await?;

  let (email, token) = {
    let guard = ctx.read();
    (
      guard.user.as_ref().map(|u| u.email.clone()),
      guard.session_token.clone(),
    )
  };
  let (email, token) = email
    .zip(token)
    .ok_or_else(|| AppError::Internal("Signin completed without a session.".to_string()))?;
  info!("Signin successful for {}.", email);

  Ok(HttpResponse::Ok().json(json!({
      "success": true,
      "email": email,
      "token": token,
  })))
}

#[instrument(name = "handler::signout", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn signout_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  app_state.sessions.revoke(&auth_user.token);
  Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
