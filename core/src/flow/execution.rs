// storefront/src/flow/execution.rs

//! `Flow::run`: walks the steps in order and drives each handler phase.

use super::definition::Flow;
use super::hooks::Phase;
use super::{FlowControl, FlowOutcome, Shared};
use crate::error::FlowError;
use tracing::{event, instrument, span, Instrument, Level};

impl<TData, Err> Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Runs every step against `ctx`.
  ///
  /// A required step without any handler fails with `FlowError::HandlerMissing`
  /// (converted into `Err`). The first handler error aborts the run; the first
  /// `FlowControl::Stop` ends it with `FlowOutcome::Stopped`.
  #[instrument(
    name = "Flow::run",
    skip_all,
    fields(flow = %self.name, num_steps = self.steps.len()),
    err(Display)
  )]
  pub async fn run(&self, ctx: Shared<TData>) -> Result<FlowOutcome, Err> {
    event!(Level::DEBUG, "Flow starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();

      if let Some(skip_if) = &step_def.skip_if {
        if skip_if(&ctx) {
          event!(Level::DEBUG, step = step_name, "Step skipped by its condition.");
          continue;
        }
      }

      let has_handlers = [Phase::Before, Phase::On, Phase::After]
        .iter()
        .any(|phase| !self.handlers_for(*phase, step_name).is_empty());
      if !has_handlers {
        if step_def.optional {
          event!(Level::DEBUG, step = step_name, "Optional step has no handlers, skipping.");
          continue;
        }
        event!(Level::ERROR, step = step_name, "Required step has no handlers.");
        return Err(Err::from(FlowError::HandlerMissing {
          flow: self.name.clone(),
          step_name: step_def.name.clone(),
        }));
      }

      let step_span = span!(Level::DEBUG, "flow_step", step = step_name, step_index = step_idx);
      let control = self.run_step(step_name, &ctx).instrument(step_span).await?;
      if control == FlowControl::Stop {
        event!(Level::INFO, step = step_name, "Flow stopped by a handler.");
        return Ok(FlowOutcome::Stopped);
      }
    }

    event!(Level::DEBUG, "Flow completed.");
    Ok(FlowOutcome::Completed)
  }

  async fn run_step(&self, step_name: &str, ctx: &Shared<TData>) -> Result<FlowControl, Err> {
    for phase in [Phase::Before, Phase::On, Phase::After] {
      for handler_fn in self.handlers_for(phase, step_name) {
        match handler_fn(ctx.clone()).await {
          Ok(FlowControl::Continue) => {}
          Ok(FlowControl::Stop) => return Ok(FlowControl::Stop),
          Err(e) => {
            event!(Level::WARN, phase = phase.label(), error = %e, "Handler failed.");
            return Err(e);
          }
        }
      }
    }
    Ok(FlowControl::Continue)
  }
}
