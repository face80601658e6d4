// storefront_server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// Postgres connection string. Without one the server keeps everything in memory.
  pub database_url: Option<String>,
  /// Seed the demo catalog (and demo user) on startup.
  pub seed_db: bool,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      database_url: None,
      seed_db: false,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    let config = Self::from_lookup(|var_name| env::var(var_name).ok())?;
    tracing::info!(
      host = %config.server_host,
      port = config.server_port,
      persistent = config.database_url.is_some(),
      seed_db = config.seed_db,
      "Application configuration loaded."
    );
    Ok(config)
  }

  /// Builds the config from any variable source; `from_env` passes the process environment.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let defaults = Self::default();

    let server_host = lookup("SERVER_HOST").unwrap_or(defaults.server_host);
    let server_port = match lookup("SERVER_PORT") {
      Some(raw) => raw
        .parse::<u16>()
        .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?,
      None => defaults.server_port,
    };
    let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
    let seed_db = match lookup("SEED_DB") {
      Some(raw) => raw
        .parse::<bool>()
        .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?,
      None => defaults.seed_db,
    };

    Ok(Self {
      server_host,
      server_port,
      database_url,
      seed_db,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
