// storefront/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Faults raised by the flow engine itself.
#[derive(Debug, Error)]
pub enum FlowError {
  #[error("Handler missing for required step '{step_name}' in flow '{flow}'")]
  HandlerMissing { flow: String, step_name: String },

  #[error("No flow registered for context type {tdata_type}")]
  NotRegistered { tdata_type: String },

  #[error("Context type mismatch (expected {expected_type})")]
  TypeMismatch { expected_type: String },

  #[error("Error in step handler. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },
}

impl From<AnyhowError> for FlowError {
  fn from(err: AnyhowError) -> Self {
    FlowError::HandlerError { source: err }
  }
}

pub type FlowResult<T, E = FlowError> = std::result::Result<T, E>;

/// Coarse, user-safe classification of a failed operation.
///
/// This is what the store keeps in a failed `OpStatus`; details stay in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  /// The user is not signed in, or the backend refused the session.
  Unauthorized,
  /// The product or user the operation refers to does not exist.
  NotFound,
  /// The request was malformed or broke a cart invariant.
  Invalid,
  /// The backend could not be reached or failed internally.
  Unavailable,
}

impl std::fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let code = match self {
      ErrorKind::Unauthorized => "unauthorized",
      ErrorKind::NotFound => "not_found",
      ErrorKind::Invalid => "invalid_request",
      ErrorKind::Unavailable => "unavailable",
    };
    f.write_str(code)
  }
}

/// Error reported by a `CartBackend`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct BackendError {
  pub kind: ErrorKind,
  pub message: String,
}

impl BackendError {
  pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
    Self {
      kind,
      message: message.into(),
    }
  }
}

/// Errors returned by `ClientStore` actions.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Sign in required")]
  NotLoggedIn,

  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Backend Error: {0}")]
  Backend(#[from] BackendError),

  #[error("Flow Error: {source}")]
  Flow {
    #[from]
    source: FlowError,
  },
}

impl StoreError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      StoreError::NotLoggedIn => ErrorKind::Unauthorized,
      StoreError::Validation(_) => ErrorKind::Invalid,
      StoreError::Backend(e) => e.kind,
      StoreError::Flow { .. } => ErrorKind::Unavailable,
    }
  }
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
