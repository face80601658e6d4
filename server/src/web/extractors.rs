// storefront_server/src/web/extractors.rs

use crate::errors::AppError;
use crate::services::session_service::SessionUser;
use crate::state::AppState;
use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::warn;
use uuid::Uuid;

/// The signed-in caller, resolved from `Authorization: Bearer <token>`.
///
/// Any handler taking this argument answers 401 before its body runs when the
/// header is missing or the token is unknown.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
  pub user_id: Uuid,
  pub email: String,
  pub token: String,
}

impl AuthenticatedUser {
  pub fn session(&self) -> SessionUser {
    SessionUser {
      user_id: self.user_id,
      email: self.email.clone(),
    }
  }
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(authenticate(req))
  }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
  req
    .headers()
    .get(header::AUTHORIZATION)?
    .to_str()
    .ok()?
    .strip_prefix("Bearer ")
    .map(str::trim)
    .filter(|token| !token.is_empty())
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
  let app_state = req
    .app_data::<web::Data<AppState>>()
    .ok_or_else(|| AppError::Internal("Application state is not configured.".to_string()))?;

  let token = bearer_token(req).ok_or_else(|| {
    warn!(path = %req.path(), "Request without bearer token.");
    AppError::Auth("Sign in required.".to_string())
  })?;

  let session = app_state.sessions.resolve(token).ok_or_else(|| {
    warn!(path = %req.path(), "Unknown session token.");
    AppError::Auth("Session is invalid or has ended.".to_string())
  })?;

  Ok(AuthenticatedUser {
    user_id: session.user_id,
    email: session.email,
    token: token.to_string(),
  })
}
