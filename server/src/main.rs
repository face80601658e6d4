// storefront_server/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use storefront_server::db::{seed, MemoryStore, PgStore};
use storefront_server::{configure_app_routes, AppConfig, AppState};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // RUST_LOG overrides
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting storefront API server...");

  let app_config = AppConfig::from_env().context("loading configuration")?;
  let bind_address = app_config.bind_address();

  let app_state = match app_config.database_url.clone() {
    Some(database_url) => {
      let store = Arc::new(PgStore::connect(&database_url).await.context("connecting to Postgres")?);
      store.ensure_schema().await.context("applying schema")?;
      if app_config.seed_db {
        store
          .insert_products(&seed::demo_products())
          .await
          .context("seeding catalog")?;
        seed::seed_demo_user(store.as_ref()).await.context("seeding demo user")?;
        tracing::info!("Database seeded.");
      }
      AppState::new(store.clone(), store, app_config)
    }
    None => {
      tracing::warn!("DATABASE_URL not set; carts and users live in memory only.");
      let store = Arc::new(MemoryStore::new());
      if app_config.seed_db {
        store.put_products(seed::demo_products());
        seed::seed_demo_user(store.as_ref()).await.context("seeding demo user")?;
        tracing::info!("In-memory store seeded.");
      }
      AppState::in_memory(store, app_config)
    }
  };

  tracing::info!("Binding server to {}...", bind_address);
  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&bind_address)
  .with_context(|| format!("binding {}", bind_address))?
  .run()
  .await
  .context("running HTTP server")
}
