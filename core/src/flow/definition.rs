// storefront/src/flow/definition.rs

//! The `Flow<TData, Err>` type: an ordered list of named steps plus the
//! handlers registered against them.

use super::handler::Handler;
use super::step::StepDef;
use crate::error::FlowError;
use std::collections::HashMap;

/// An ordered sequence of named steps run against a `Shared<TData>`.
///
/// Each step carries three handler phases (`before`, `on`, `after`), run in
/// that order and in registration order within a phase. `Err` is the error
/// type handlers return; it must absorb engine faults via `From<FlowError>`.
pub struct Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub(crate) name: String,
  pub(crate) steps: Vec<StepDef<TData>>,
  pub(crate) before: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) after: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub fn new(name: &str, steps: impl IntoIterator<Item = StepDef<TData>>) -> Self {
    Self {
      name: name.to_string(),
      steps: steps.into_iter().collect(),
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  /// Shorthand for a flow whose steps are all required and unconditional.
  pub fn required(name: &str, step_names: &[&str]) -> Self {
    Self::new(name, step_names.iter().map(|s| StepDef::required(s)))
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  /// Panics on an unknown step name: that is a wiring mistake, not a runtime condition.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) {
    if !self.steps.iter().any(|s| s.name == step_name) {
      panic!(
        "Flow '{}' setup error: step '{}' is not defined.",
        self.name, step_name
      );
    }
  }
}
