//! Server entry point.

use std::env;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use care_office::api::{AppState, create_router};
use care_office::config::ServerConfig;
use care_office::db;
use care_office::error::OfficeError;

/// Environment variable naming the YAML configuration file.
const CONFIG_ENV: &str = "CARE_OFFICE_CONFIG";

/// Fallback configuration path when the environment variable is unset.
const DEFAULT_CONFIG_PATH: &str = "config/care-office.yaml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "care_office=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = match ServerConfig::load(&config_path) {
        Ok(config) => config,
        Err(OfficeError::ConfigNotFound { path }) => {
            warn!(path = %path, "Config file not found, using defaults");
            ServerConfig::default()
        }
        Err(err) => return Err(err.into()),
    };

    let conn = db::open(&config.database_path)?;
    info!(database = %config.database_path, "Database opened");

    let state = AppState::new(conn);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Listening");
    axum::serve(listener, router).await?;

    Ok(())
}
