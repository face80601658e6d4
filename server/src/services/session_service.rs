// storefront_server/src/services/session_service.rs

//! Opaque bearer tokens issued at sign-in.

use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Who a token belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
  pub user_id: Uuid,
  pub email: String,
}

/// In-process token table. Tokens live until revoked or the process exits.
#[derive(Debug, Default)]
pub struct SessionStore {
  tokens: RwLock<HashMap<String, SessionUser>>,
}

impl SessionStore {
  pub fn new() -> Self {
    Self::default()
  }

  #[instrument(name = "SessionStore::issue", skip(self, email), fields(user_id = %user_id))]
  pub fn issue(&self, user_id: Uuid, email: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    self.tokens.write().insert(
      token.clone(),
      SessionUser {
        user_id,
        email: email.to_string(),
      },
    );
    debug!("Session token issued.");
    token
  }

  pub fn resolve(&self, token: &str) -> Option<SessionUser> {
    self.tokens.read().get(token).cloned()
  }

  /// `true` if the token existed.
  pub fn revoke(&self, token: &str) -> bool {
    self.tokens.write().remove(token).is_some()
  }
}
