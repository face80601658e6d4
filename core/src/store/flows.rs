// storefront/src/store/flows.rs

//! The flow every store action runs through, generic over the `ListOp`.
//!
//! Steps, in order:
//! 1. `require_login`  fails with `StoreError::NotLoggedIn` when signed out.
//! 2. `validate`       rejects malformed input before any state changes.
//! 3. `guard_pending`  stops while the same operation is still in flight.
//! 4. `skip_noop`      stops when the op would change nothing (e.g. adding a
//!                     product already in the cart), so no request is sent.
//! 5. `begin`          marks the status `Pending`; optimistic mode applies
//!                     the change locally and remembers the prior list.
//! 6. `persist`        calls the backend. On failure the op's own change is
//!                     reverted and the status becomes `Failed(kind)`.
//! 7. `commit`         pessimistic mode applies the change now; the status
//!                     becomes `Succeeded`.

use super::backend::CartBackend;
use super::ops::ListOp;
use super::state::{OpStatus, StoreState};
use super::{SyncOptions, UpdateMode};
use crate::error::{StoreError, StoreResult};
use crate::flow::{Flow, FlowControl, Shared};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const STEPS: &[&str] = &[
  "require_login",
  "validate",
  "guard_pending",
  "skip_noop",
  "begin",
  "persist",
  "commit",
];

/// Context for one dispatched action.
pub struct MutationCtx<Op: ListOp> {
  pub store: Shared<StoreState>,
  pub backend: Arc<dyn CartBackend>,
  pub options: SyncOptions,
  pub op: Op,
  pub email: Option<String>,
  /// List before an optimistic apply; `revert` looks up removed entries here.
  pub previous: Option<Vec<Op::Item>>,
  /// List after the change, as computed in `begin`.
  pub next: Vec<Op::Item>,
}

impl<Op: ListOp> MutationCtx<Op> {
  pub fn new(store: Shared<StoreState>, backend: Arc<dyn CartBackend>, options: SyncOptions, op: Op) -> Self {
    Self {
      store,
      backend,
      options,
      op,
      email: None,
      previous: None,
      next: Vec::new(),
    }
  }
}

pub fn build_mutation_flow<Op: ListOp>() -> Flow<MutationCtx<Op>, StoreError> {
  let mut flow = Flow::required(&format!("{:?}", Op::OPERATION), STEPS);
  flow.on("require_login", require_login::<Op>);
  flow.on("validate", validate::<Op>);
  flow.on("guard_pending", guard_pending::<Op>);
  flow.on("skip_noop", skip_noop::<Op>);
  flow.on("begin", begin::<Op>);
  flow.on("persist", persist::<Op>);
  flow.on("commit", commit::<Op>);
  flow
}

async fn require_login<Op: ListOp>(ctx: Shared<MutationCtx<Op>>) -> StoreResult<FlowControl> {
  let store = ctx.read().store.clone();
  let email = store.read().session.email().map(str::to_string);
  match email {
    Some(email) => {
      ctx.write().email = Some(email);
      Ok(FlowControl::Continue)
    }
    None => {
      warn!(operation = ?Op::OPERATION, "Action requires a signed-in user.");
      Err(StoreError::NotLoggedIn)
    }
  }
}

async fn validate<Op: ListOp>(ctx: Shared<MutationCtx<Op>>) -> StoreResult<FlowControl> {
  ctx.read().op.validate()?;
  Ok(FlowControl::Continue)
}

async fn guard_pending<Op: ListOp>(ctx: Shared<MutationCtx<Op>>) -> StoreResult<FlowControl> {
  let store = ctx.read().store.clone();
  if store.read().status(Op::OPERATION).is_loading() {
    info!(operation = ?Op::OPERATION, "Same operation already in flight, ignoring dispatch.");
    return Ok(FlowControl::Stop);
  }
  Ok(FlowControl::Continue)
}

async fn skip_noop<Op: ListOp>(ctx: Shared<MutationCtx<Op>>) -> StoreResult<FlowControl> {
  let (store, op) = {
    let guard = ctx.read();
    (guard.store.clone(), guard.op.clone())
  };
  if op.is_noop(Op::list(&store.read())) {
    debug!(operation = ?Op::OPERATION, "Nothing to change.");
    return Ok(FlowControl::Stop);
  }
  Ok(FlowControl::Continue)
}

async fn begin<Op: ListOp>(ctx: Shared<MutationCtx<Op>>) -> StoreResult<FlowControl> {
  let (store, op, mode) = {
    let guard = ctx.read();
    (guard.store.clone(), guard.op.clone(), guard.options.mode)
  };

  let (current, next) = store.update(|state| {
    *state.status_mut(Op::OPERATION) = OpStatus::Pending;
    let current = Op::list(state).clone();
    let mut next = current.clone();
    op.apply(&mut next);
    if mode == UpdateMode::Optimistic {
      *Op::list_mut(state) = next.clone();
    }
    (current, next)
  });

  let mut guard = ctx.write();
  if mode == UpdateMode::Optimistic {
    guard.previous = Some(current);
  }
  guard.next = next;
  Ok(FlowControl::Continue)
}

async fn persist<Op: ListOp>(ctx: Shared<MutationCtx<Op>>) -> StoreResult<FlowControl> {
  let (store, backend, op, email, strategy, next) = {
    let guard = ctx.read();
    (
      guard.store.clone(),
      guard.backend.clone(),
      guard.op.clone(),
      guard.email.clone().unwrap_or_default(),
      guard.options.strategy,
      guard.next.clone(),
    )
  };

  match op.persist(backend.as_ref(), &email, strategy, &next).await {
    Ok(()) => Ok(FlowControl::Continue),
    Err(e) => {
      warn!(operation = ?Op::OPERATION, error = %e, "Backend rejected the change.");
      let previous = ctx.write().previous.take();
      store.update(|state| {
        if let Some(previous) = previous {
          op.revert(Op::list_mut(state), &previous);
        }
        *state.status_mut(Op::OPERATION) = OpStatus::Failed(e.kind);
      });
      Err(StoreError::Backend(e))
    }
  }
}

async fn commit<Op: ListOp>(ctx: Shared<MutationCtx<Op>>) -> StoreResult<FlowControl> {
  let (store, op, mode) = {
    let guard = ctx.read();
    (guard.store.clone(), guard.op.clone(), guard.options.mode)
  };
  store.update(|state| {
    if mode == UpdateMode::Pessimistic {
      op.apply(Op::list_mut(state));
    }
    *state.status_mut(Op::OPERATION) = OpStatus::Succeeded;
  });
  Ok(FlowControl::Continue)
}
