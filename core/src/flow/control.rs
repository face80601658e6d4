// storefront/src/flow/control.rs

//! Signals returned by flow handlers and the outcome of a whole flow run.

/// Returned by each handler: keep going, or halt the flow right here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
  Continue,
  /// Skip every remaining handler and step. The run reports `FlowOutcome::Stopped`.
  Stop,
}

/// Outcome of a flow run that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
  /// Every step ran (or was skipped by its condition).
  Completed,
  /// A handler returned `FlowControl::Stop`.
  Stopped,
}

impl FlowOutcome {
  pub fn is_completed(self) -> bool {
    matches!(self, FlowOutcome::Completed)
  }
}
