// storefront_server/src/web/handlers/mod.rs

pub mod auth_handlers;
pub mod cart_handlers;
pub mod favourite_handlers;
pub mod product_handlers;

use crate::errors::AppError;
use crate::state::AppState;
use storefront::{FlowOutcome, Shared};
use tracing::warn;

/// Runs the flow registered for `T`. None of the request flows stop on
/// purpose, so a stop is reported as an internal error.
pub(crate) async fn run_flow<T>(app_state: &AppState, ctx: &Shared<T>) -> Result<(), AppError>
where
  T: Send + Sync + 'static,
{
  match app_state.flows.run(ctx.clone()).await? {
    FlowOutcome::Completed => Ok(()),
    FlowOutcome::Stopped => {
      warn!(context = %std::any::type_name::<T>(), "Request flow was halted by a handler.");
      Err(AppError::Internal("Request was halted.".to_string()))
    }
  }
}
