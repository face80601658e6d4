// storefront/src/flow/hooks.rs

//! Registration of `before`, `on` and `after` handlers.

use super::definition::Flow;
use super::handler::Handler;
use super::{FlowControl, Shared};
use crate::error::FlowError;
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
  Before,
  On,
  After,
}

impl Phase {
  pub(crate) fn label(self) -> &'static str {
    match self {
      Phase::Before => "before",
      Phase::On => "on",
      Phase::After => "after",
    }
  }
}

impl<TData, Err> Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Registers a handler that runs before the step's `on` handlers.
  ///
  /// The handler's own error type only has to convert into `Err`, so steps can
  /// return `FlowError`, `anyhow`-backed errors or the flow's error directly.
  pub fn before<F, HandlerErr>(&mut self, step_name: &str, handler_fn: impl Fn(Shared<TData>) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<FlowControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<Err> + Send + Sync + 'static,
  {
    self.push_handler(Phase::Before, step_name, handler_fn);
  }

  pub fn on<F, HandlerErr>(&mut self, step_name: &str, handler_fn: impl Fn(Shared<TData>) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<FlowControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<Err> + Send + Sync + 'static,
  {
    self.push_handler(Phase::On, step_name, handler_fn);
  }

  pub fn after<F, HandlerErr>(&mut self, step_name: &str, handler_fn: impl Fn(Shared<TData>) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<FlowControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<Err> + Send + Sync + 'static,
  {
    self.push_handler(Phase::After, step_name, handler_fn);
  }

  fn push_handler<F, HandlerErr>(
    &mut self,
    phase: Phase,
    step_name: &str,
    handler_fn: impl Fn(Shared<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<FlowControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    let boxed: Handler<TData, Err> = Box::new(move |ctx| {
      let fut = handler_fn(ctx);
      Box::pin(async move { fut.await.map_err(Into::into) })
    });
    let table = match phase {
      Phase::Before => &mut self.before,
      Phase::On => &mut self.on,
      Phase::After => &mut self.after,
    };
    table.entry(step_name.to_string()).or_default().push(boxed);
  }

  pub(crate) fn handlers_for(&self, phase: Phase, step_name: &str) -> &[Handler<TData, Err>] {
    let table = match phase {
      Phase::Before => &self.before,
      Phase::On => &self.on,
      Phase::After => &self.after,
    };
    table.get(step_name).map(Vec::as_slice).unwrap_or(&[])
  }
}
