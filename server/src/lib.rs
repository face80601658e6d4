// storefront_server/src/lib.rs

//! HTTP API for the storefront: catalog, sign-up/sign-in, and per-user
//! cart and favourites persistence, including the legacy whole-cart
//! `PATCH /api/cart`.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod pipelines;
pub mod services;
pub mod state;
pub mod web;

pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use state::AppState;
pub use web::configure_app_routes;
