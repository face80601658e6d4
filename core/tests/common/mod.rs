// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::Arc;
use storefront::store::CartBackend;
use storefront::{
  BackendError, CartItem, ClientStore, ErrorKind, FavouriteItem, FlowControl, FlowError, MemoryBackend, ProductId, Shared,
  SyncOptions,
};
use tokio::sync::Semaphore;
use tracing::Level;

pub const EMAIL: &str = "jane@example.com";

// --- Flow engine fixtures ---

#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Flow engine error: {0}")]
  Flow(String),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<FlowError> for TestError {
  fn from(e: FlowError) -> Self {
    TestError::Flow(format!("{:?}", e))
  }
}

pub fn create_simple_handler(
  step_name: &'static str,
  message_to_append: &'static str,
) -> storefront::Handler<TestContext, TestError> {
  Box::new(move |ctx: Shared<TestContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.message.push_str(message_to_append);
      guard.steps_executed.push(step_name.to_string());
      if guard.should_stop_at.as_deref() == Some(step_name) {
        return Ok(FlowControl::Stop);
      }
      Ok(FlowControl::Continue)
    })
  })
}

pub fn create_failing_handler(
  step_name: &'static str,
  error_message: &'static str,
) -> storefront::Handler<TestContext, TestError> {
  Box::new(move |ctx: Shared<TestContext>| {
    Box::pin(async move {
      ctx.write().steps_executed.push(step_name.to_string());
      Err(TestError::Handler(error_message.to_string()))
    })
  })
}

// --- Tracing ---

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Store fixtures ---

pub fn pid(id: &str) -> ProductId {
  ProductId::new(id)
}

/// A store signed in as `EMAIL` against a fresh in-memory backend.
pub async fn signed_in_store(options: SyncOptions) -> (ClientStore, Arc<MemoryBackend>) {
  let backend = Arc::new(MemoryBackend::new());
  backend.register_user(EMAIL);
  let store = ClientStore::new(backend.clone(), options);
  store.sign_in(EMAIL).await.expect("sign in");
  (store, backend)
}

/// Wraps a `MemoryBackend`; mutating calls wait for a permit from `release`.
pub struct GatedBackend {
  pub inner: Arc<MemoryBackend>,
  gate: Semaphore,
}

impl GatedBackend {
  pub fn new(inner: Arc<MemoryBackend>) -> Self {
    Self {
      inner,
      gate: Semaphore::new(0),
    }
  }

  pub fn release(&self, n: usize) {
    self.gate.add_permits(n);
  }

  async fn pass(&self) {
    self.gate.acquire().await.expect("gate open").forget();
  }
}

#[async_trait]
impl CartBackend for GatedBackend {
  async fn fetch_cart(&self, email: &str) -> Result<Vec<CartItem>, BackendError> {
    self.inner.fetch_cart(email).await
  }

  async fn replace_cart(&self, email: &str, items: &[CartItem]) -> Result<(), BackendError> {
    self.pass().await;
    self.inner.replace_cart(email, items).await
  }

  async fn upsert_cart_line(&self, email: &str, item: &CartItem) -> Result<(), BackendError> {
    self.pass().await;
    self.inner.upsert_cart_line(email, item).await
  }

  async fn delete_cart_line(&self, email: &str, product_id: &ProductId) -> Result<(), BackendError> {
    self.pass().await;
    self.inner.delete_cart_line(email, product_id).await
  }

  async fn fetch_favourites(&self, email: &str) -> Result<Vec<FavouriteItem>, BackendError> {
    self.inner.fetch_favourites(email).await
  }

  async fn add_favourite(&self, email: &str, product_id: &ProductId) -> Result<(), BackendError> {
    self.pass().await;
    self.inner.add_favourite(email, product_id).await
  }

  async fn remove_favourite(&self, email: &str, product_id: &ProductId) -> Result<(), BackendError> {
    self.pass().await;
    self.inner.remove_favourite(email, product_id).await
  }

  async fn clear_favourites(&self, email: &str) -> Result<(), BackendError> {
    self.pass().await;
    self.inner.clear_favourites(email).await
  }
}

/// Line-item adds (cart upsert, favourite add) wait for `release` and then
/// fail; every other call goes straight to `inner`.
pub struct FailingAddBackend {
  pub inner: Arc<MemoryBackend>,
  gate: Semaphore,
}

impl FailingAddBackend {
  pub fn new(inner: Arc<MemoryBackend>) -> Self {
    Self {
      inner,
      gate: Semaphore::new(0),
    }
  }

  pub fn release(&self, n: usize) {
    self.gate.add_permits(n);
  }

  async fn held_failure(&self) -> BackendError {
    self.gate.acquire().await.expect("gate open").forget();
    BackendError::new(ErrorKind::Unavailable, "backend went away")
  }
}

#[async_trait]
impl CartBackend for FailingAddBackend {
  async fn fetch_cart(&self, email: &str) -> Result<Vec<CartItem>, BackendError> {
    self.inner.fetch_cart(email).await
  }

  async fn replace_cart(&self, email: &str, items: &[CartItem]) -> Result<(), BackendError> {
    self.inner.replace_cart(email, items).await
  }

  async fn upsert_cart_line(&self, _email: &str, _item: &CartItem) -> Result<(), BackendError> {
    Err(self.held_failure().await)
  }

  async fn delete_cart_line(&self, email: &str, product_id: &ProductId) -> Result<(), BackendError> {
    self.inner.delete_cart_line(email, product_id).await
  }

  async fn fetch_favourites(&self, email: &str) -> Result<Vec<FavouriteItem>, BackendError> {
    self.inner.fetch_favourites(email).await
  }

  async fn add_favourite(&self, _email: &str, _product_id: &ProductId) -> Result<(), BackendError> {
    Err(self.held_failure().await)
  }

  async fn remove_favourite(&self, email: &str, product_id: &ProductId) -> Result<(), BackendError> {
    self.inner.remove_favourite(email, product_id).await
  }

  async fn clear_favourites(&self, email: &str) -> Result<(), BackendError> {
    self.inner.clear_favourites(email).await
  }
}
