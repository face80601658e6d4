// storefront/src/flow/handler.rs

use super::{FlowControl, Shared};
use std::future::Future;
use std::pin::Pin;

/// A boxed async step handler.
///
/// Receives a clone of the flow's shared context. Handlers must release any
/// guard they take on it before awaiting.
pub type Handler<TData, Err> = Box<
  dyn Fn(Shared<TData>) -> Pin<Box<dyn Future<Output = Result<FlowControl, Err>> + Send>>
    + Send
    + Sync,
>;
