// storefront/src/credentials.rs

//! Sign-in / sign-up credential rules, shared by the client form and the API.

use crate::error::StoreError;

pub const PASSWORD_MIN_LEN: usize = 4;
pub const PASSWORD_MAX_LEN: usize = 16;

/// Credentials after validation; the email is lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
  pub email: String,
  pub password: String,
}

/// Validates the sign-in form fields and normalises the email.
pub fn validate_credentials(email: &str, password: &str) -> Result<Credentials, StoreError> {
  let email = email.trim();
  if email.is_empty() {
    return Err(StoreError::Validation("email is required".to_string()));
  }
  if !looks_like_email(email) {
    return Err(StoreError::Validation("email must be a valid email".to_string()));
  }
  let len = password.chars().count();
  if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
    return Err(StoreError::Validation(format!(
      "password must be between {} and {} characters",
      PASSWORD_MIN_LEN, PASSWORD_MAX_LEN
    )));
  }
  Ok(Credentials {
    email: email.to_lowercase(),
    password: password.to_string(),
  })
}

fn looks_like_email(s: &str) -> bool {
  if s.chars().any(char::is_whitespace) {
    return false;
  }
  let Some((local, domain)) = s.split_once('@') else {
    return false;
  };
  !local.is_empty()
    && !domain.contains('@')
    && domain.split('.').count() >= 2
    && domain.split('.').all(|label| !label.is_empty())
}
