// storefront_server/src/models/user.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: Uuid,
  /// Always stored lower-case.
  pub email: String,
  #[serde(skip_serializing)] // Never send password hash to client
  pub password_hash: String,
  pub created_at: DateTime<Utc>,
}

impl User {
  pub fn new(email: &str, password_hash: String) -> Self {
    Self {
      id: Uuid::new_v4(),
      email: email.to_lowercase(),
      password_hash,
      created_at: Utc::now(),
    }
  }
}
