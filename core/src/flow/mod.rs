// storefront/src/flow/mod.rs

//! A small async step engine. Every cart/favourite mutation, on the client
//! store and in the API server, is a `Flow` of named steps run against a
//! `Shared` context.

pub mod control;
pub mod definition;
pub mod execution;
pub mod handler;
pub mod hooks;
pub mod registry;
pub mod shared;
pub mod step;

pub use control::{FlowControl, FlowOutcome};
pub use definition::Flow;
pub use handler::Handler;
pub use registry::FlowRegistry;
pub use shared::Shared;
pub use step::{SkipCondition, StepDef};
