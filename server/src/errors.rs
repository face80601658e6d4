// storefront_server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use storefront::{ErrorKind, FlowError, StoreError};
use thiserror::Error;

/// Message sent for every failure whose details must stay server-side.
pub const GENERIC_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  /// The legacy cart endpoint could not match the body's email to a user.
  /// Kept as 401 because existing clients branch on it.
  #[error("Unknown user for cart update")]
  UnknownUser,

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Conflict: {0}")]
  Conflict(String),

  #[error("Method not supported on this resource")]
  UnsupportedMethod,

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Flow Error: {source}")]
  Workflow {
    #[from]
    source: FlowError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  /// Stable machine-readable code sent alongside the message.
  pub fn code(&self) -> &'static str {
    match self {
      AppError::Validation(_) => "invalid_request",
      AppError::Auth(_) | AppError::UnknownUser => "unauthorized",
      AppError::NotFound(_) => "not_found",
      AppError::Conflict(_) => "conflict",
      AppError::UnsupportedMethod => "unsupported_method",
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Workflow { .. } | AppError::Internal(_) => "internal",
    }
  }

  /// What the client may see. Server faults collapse to `GENERIC_MESSAGE`.
  fn public_message(&self) -> String {
    match self {
      AppError::Validation(m) | AppError::Auth(m) | AppError::NotFound(m) | AppError::Conflict(m) => m.clone(),
      AppError::UnsupportedMethod => "Method not supported".to_string(),
      AppError::UnknownUser
      | AppError::Config(_)
      | AppError::Sqlx(_)
      | AppError::Workflow { .. }
      | AppError::Internal(_) => GENERIC_MESSAGE.to_string(),
    }
  }
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<sqlx::Error>() {
      Ok(sqlx_err) => AppError::Sqlx(sqlx_err),
      Err(other) => AppError::Internal(other.to_string()),
    }
  }
}

impl From<StoreError> for AppError {
  fn from(err: StoreError) -> Self {
    match err {
      StoreError::NotLoggedIn => AppError::Auth("Sign in required.".to_string()),
      StoreError::Validation(m) => AppError::Validation(m),
      StoreError::Backend(e) => match e.kind {
        ErrorKind::Unauthorized => AppError::Auth(e.message),
        ErrorKind::NotFound => AppError::NotFound(e.message),
        ErrorKind::Invalid => AppError::Validation(e.message),
        ErrorKind::Unavailable => AppError::Internal(e.message),
      },
      StoreError::Flow { source } => AppError::Workflow { source },
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) | AppError::UnsupportedMethod => StatusCode::BAD_REQUEST,
      AppError::Auth(_) | AppError::UnknownUser => StatusCode::UNAUTHORIZED,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Conflict(_) => StatusCode::CONFLICT,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Workflow { .. } | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, status = status.as_u16(), "Rejecting request");
    }
    HttpResponse::build(status).json(json!({
        "success": false,
        "code": self.code(),
        "message": self.public_message(),
    }))
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::body::to_bytes;

  async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
    let resp = err.error_response();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body()).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  #[actix_rt::test]
  async fn unknown_user_is_401_with_generic_message() {
    let (status, body) = body_of(AppError::UnknownUser).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], GENERIC_MESSAGE);
  }

  #[actix_rt::test]
  async fn internal_details_are_not_leaked() {
    let (status, body) = body_of(AppError::Internal("connection refused at 10.0.0.3".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "internal");
    assert_eq!(body["message"], GENERIC_MESSAGE);
  }

  #[actix_rt::test]
  async fn validation_message_is_passed_through() {
    let (status, body) = body_of(AppError::Validation("quantity must be at least 1".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], "quantity must be at least 1");
  }

  #[test]
  fn anyhow_wrapping_sqlx_keeps_the_database_variant() {
    let err = AppError::from(anyhow::Error::new(sqlx::Error::RowNotFound));
    assert!(matches!(err, AppError::Sqlx(_)));
  }
}
