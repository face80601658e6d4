// storefront_server/src/pipelines/mod.rs

//! Request flows, one per context type, registered once at startup.

use crate::errors::AppError;
use storefront::FlowRegistry;

pub mod contexts;

pub mod cart_pipeline;
pub mod favourite_pipeline;
pub mod signin_pipeline;
pub mod signup_pipeline;

pub fn register_all_flows(registry: &FlowRegistry<AppError>) {
  tracing::info!("Registering request flows...");

  signup_pipeline::register_signup_flow(registry);
  signin_pipeline::register_signin_flow(registry);
  cart_pipeline::register_replace_cart_flow(registry);
  cart_pipeline::register_cart_line_flow(registry);
  favourite_pipeline::register_favourite_flow(registry);

  tracing::info!("All request flows registered.");
}
