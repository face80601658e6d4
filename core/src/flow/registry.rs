// storefront/src/flow/registry.rs

//! `FlowRegistry<E>`: flows keyed by the type of context they run on.

use super::definition::Flow;
use super::{FlowOutcome, Shared};
use crate::error::FlowError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{event, Level};

#[async_trait]
trait ErasedFlow<AppErr>: Send + Sync
where
  AppErr: std::error::Error + Send + Sync + 'static,
{
  async fn run_erased(&self, ctx: Box<dyn Any + Send>) -> Result<FlowOutcome, AppErr>;
}

struct FlowRunner<TData, FlowErr, AppErr>
where
  TData: 'static + Send + Sync,
  FlowErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  flow: Flow<TData, FlowErr>,
  _app_err: PhantomData<fn() -> AppErr>,
}

#[async_trait]
impl<TData, FlowErr, AppErr> ErasedFlow<AppErr> for FlowRunner<TData, FlowErr, AppErr>
where
  TData: 'static + Send + Sync,
  FlowErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
  AppErr: std::error::Error + From<FlowErr> + From<FlowError> + Send + Sync + 'static,
{
  async fn run_erased(&self, ctx: Box<dyn Any + Send>) -> Result<FlowOutcome, AppErr> {
    let typed = ctx.downcast::<Shared<TData>>().map_err(|_| {
      AppErr::from(FlowError::TypeMismatch {
        expected_type: std::any::type_name::<Shared<TData>>().to_string(),
      })
    })?;
    self.flow.run(*typed).await.map_err(AppErr::from)
  }
}

/// Holds one flow per context type and dispatches `run` calls to it.
///
/// `AppErr` is what callers get back; it absorbs both the flows' own error
/// types and registry faults such as an unregistered context type.
pub struct FlowRegistry<AppErr = FlowError>
where
  AppErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  flows: RwLock<HashMap<TypeId, Arc<dyn ErasedFlow<AppErr>>>>,
}

impl<AppErr> FlowRegistry<AppErr>
where
  AppErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub fn new() -> Self {
    Self {
      flows: RwLock::new(HashMap::new()),
    }
  }

  /// Registers `flow` for its context type, replacing any earlier one.
  pub fn register<TData, FlowErr>(&self, flow: Flow<TData, FlowErr>)
  where
    TData: 'static + Send + Sync,
    FlowErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
    AppErr: From<FlowErr>,
  {
    event!(Level::DEBUG, flow = %flow.name(), tdata_type = %std::any::type_name::<TData>(), "Registering flow.");
    let runner = FlowRunner::<TData, FlowErr, AppErr> {
      flow,
      _app_err: PhantomData,
    };
    self.flows.write().insert(TypeId::of::<TData>(), Arc::new(runner));
  }

  pub fn contains<TData: 'static + Send + Sync>(&self) -> bool {
    self.flows.read().contains_key(&TypeId::of::<TData>())
  }

  /// Runs the flow registered for `TData` against `ctx`.
  pub async fn run<TData>(&self, ctx: Shared<TData>) -> Result<FlowOutcome, AppErr>
  where
    TData: 'static + Send + Sync,
  {
    let runner = self.flows.read().get(&TypeId::of::<TData>()).cloned();
    let runner = runner.ok_or_else(|| {
      let type_name = std::any::type_name::<TData>();
      event!(Level::ERROR, "No flow registered for {}.", type_name);
      AppErr::from(FlowError::NotRegistered {
        tdata_type: type_name.to_string(),
      })
    })?;
    runner.run_erased(Box::new(ctx)).await
  }
}

impl<AppErr> Default for FlowRegistry<AppErr>
where
  AppErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}
