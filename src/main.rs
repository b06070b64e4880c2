//! Waiting Room Server: admission control in front of a protected origin
//!
//! Main entry point that loads configuration, initializes logging, and
//! starts the gateway.

use tracing_subscriber::{EnvFilter, fmt};

use waitroom_core::config::{AppConfig, DEFAULT_ENVIRONMENT};

#[tokio::main]
async fn main() {
    let env = std::env::var("WAITROOM_ENV").unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    tracing::info!(environment = %env, "Configuration loaded");
    for warning in config.startup_warnings(&env) {
        tracing::warn!("{}", warning);
    }

    if let Err(e) = waitroom_api::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }

    tracing::info!("Starting waiting room v{}", env!("CARGO_PKG_VERSION"));
}
