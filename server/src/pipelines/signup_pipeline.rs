// storefront_server/src/pipelines/signup_pipeline.rs

use crate::errors::AppError;
use crate::models::User;
use crate::pipelines::contexts::SignupCtxData;
use crate::services::auth_service;
use storefront::{validate_credentials, Flow, FlowControl, FlowRegistry, Shared};
use tracing::{event, info, warn, Level};

pub fn register_signup_flow(registry: &FlowRegistry<AppError>) {
  let mut signup = Flow::<SignupCtxData, AppError>::required(
    "signup",
    &["validate_signup_input", "check_existing_user", "create_user"],
  );

  // Same rules as the sign-in form; the email comes back lower-cased.
  signup.on("validate_signup_input", |ctx_data: Shared<SignupCtxData>| {
    Box::pin(async move {
      let (email_val, password_val) = {
        let guard = ctx_data.read();
        (guard.email.clone(), guard.password.clone())
      };

      let credentials = validate_credentials(&email_val, &password_val).map_err(AppError::from)?;
      event!(Level::DEBUG, email = %credentials.email, "Signup input valid.");
      ctx_data.write().email = credentials.email;
      Ok::<_, AppError>(FlowControl::Continue)
    })
  });

  signup.on("check_existing_user", |ctx_data: Shared<SignupCtxData>| {
    Box::pin(async move {
      let (email_val, users) = {
        let guard = ctx_data.read();
        (guard.email.clone(), guard.app_state.users.clone())
      };

      if users.find_user_by_email(&email_val).await?.is_some() {
        warn!("Attempt to sign up with existing email: {}", email_val);
        return Err(AppError::Conflict("An account with this email already exists.".to_string()));
      }
      Ok::<_, AppError>(FlowControl::Continue)
    })
  });

  signup.on("create_user", |ctx_data: Shared<SignupCtxData>| {
    Box::pin(async move {
      let (email_val, password_val, users) = {
        let guard = ctx_data.read();
        (guard.email.clone(), guard.password.clone(), guard.app_state.users.clone())
      };

      let hashed_password = auth_service::hash_password(&password_val)?;
      // A concurrent signup can still win the race; the store reports Conflict then.
      let new_user = users.create_user(User::new(&email_val, hashed_password)).await?;
      info!("User created: ID={}, Email={}", new_user.id, new_user.email);
      ctx_data.write().created_user = Some(new_user);
      Ok::<_, AppError>(FlowControl::Continue)
    })
  });

  registry.register(signup);
  tracing::info!("Sign-up flow registered.");
}
