// storefront_server/src/state.rs

use crate::config::AppConfig;
use crate::db::{MemoryStore, ProductCatalog, UserStore};
use crate::errors::AppError;
use crate::pipelines;
use crate::services::session_service::SessionStore;
use std::sync::Arc;
use storefront::FlowRegistry;

#[derive(Clone)]
pub struct AppState {
  pub users: Arc<dyn UserStore>,
  pub catalog: Arc<dyn ProductCatalog>,
  pub sessions: Arc<SessionStore>,
  pub flows: Arc<FlowRegistry<AppError>>,
  pub config: Arc<AppConfig>,
}

impl AppState {
  /// Wires the stores and registers every request flow.
  pub fn new(users: Arc<dyn UserStore>, catalog: Arc<dyn ProductCatalog>, config: AppConfig) -> Self {
    let flows = Arc::new(FlowRegistry::<AppError>::new());
    pipelines::register_all_flows(&flows);
    Self {
      users,
      catalog,
      sessions: Arc::new(SessionStore::new()),
      flows,
      config: Arc::new(config),
    }
  }

  /// One `MemoryStore` serving as both user store and catalog.
  pub fn in_memory(store: Arc<MemoryStore>, config: AppConfig) -> Self {
    Self::new(store.clone(), store, config)
  }
}
