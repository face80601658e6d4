// storefront_server/src/pipelines/signin_pipeline.rs

use crate::errors::AppError;
use crate::pipelines::contexts::SigninCtxData;
use crate::services::auth_service;
use storefront::{validate_credentials, Flow, FlowControl, FlowRegistry, Shared};
use tracing::{event, warn, Level};

const INVALID_CREDENTIALS: &str = "Invalid email or password.";

pub fn register_signin_flow(registry: &FlowRegistry<AppError>) {
  let mut signin = Flow::<SigninCtxData, AppError>::required(
    "signin",
    &[
      "validate_signin_input",
      "fetch_user_by_email",
      "verify_user_password",
      "issue_session_token",
    ],
  );

  signin.on("validate_signin_input", |ctx_data: Shared<SigninCtxData>| {
    Box::pin(async move {
      let (email_val, password_val) = {
        let guard = ctx_data.read();
        (guard.email.clone(), guard.password.clone())
      };
      let credentials = validate_credentials(&email_val, &password_val).map_err(AppError::from)?;
      ctx_data.write().email = credentials.email;
      Ok::<_, AppError>(FlowControl::Continue)
    })
  });

  signin.on("fetch_user_by_email", |ctx_data: Shared<SigninCtxData>| {
    Box::pin(async move {
      let (email_val, users) = {
        let guard = ctx_data.read();
        (guard.email.clone(), guard.app_state.users.clone())
      };

      match users.find_user_by_email(&email_val).await? {
        Some(user) => {
          event!(Level::DEBUG, user_id = %user.id, "User found for signin.");
          ctx_data.write().user = Some(user);
          Ok::<_, AppError>(FlowControl::Continue)
        }
        None => {
          warn!("User not found for email during signin: {}", email_val);
          Err(AppError::Auth(INVALID_CREDENTIALS.to_string()))
        }
      }
    })
  });

  signin.on("verify_user_password", |ctx_data: Shared<SigninCtxData>| {
    Box::pin(async move {
      let (stored_hash, password_val) = {
        let guard = ctx_data.read();
        (
          guard.user.as_ref().map(|u| u.password_hash.clone()),
          guard.password.clone(),
        )
      };
      let stored_hash = stored_hash.ok_or_else(|| AppError::Internal("User missing before password check.".to_string()))?;

      if auth_service::verify_password(&stored_hash, &password_val)? {
        Ok::<_, AppError>(FlowControl::Continue)
      } else {
        warn!("Password mismatch during signin.");
        Err(AppError::Auth(INVALID_CREDENTIALS.to_string()))
      }
    })
  });

  signin.on("issue_session_token", |ctx_data: Shared<SigninCtxData>| {
    Box::pin(async move {
      let (user, sessions) = {
        let guard = ctx_data.read();
        (guard.user.clone(), guard.app_state.sessions.clone())
      };
      let user = user.ok_or_else(|| AppError::Internal("User missing before token issue.".to_string()))?;

      let token = sessions.issue(user.id, &user.email);
      event!(Level::INFO, user_id = %user.id, "Session token issued.");
      ctx_data.write().session_token = Some(token);
      Ok::<_, AppError>(FlowControl::Continue)
    })
  });

  registry.register(signin);
  tracing::info!("Sign-in flow registered.");
}
