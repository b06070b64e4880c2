//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod admin;
pub mod app;
pub mod logging;
pub mod origin;
pub mod queue;
pub mod session;
pub mod store;
pub mod token;

use serde::{Deserialize, Serialize};

pub use self::admin::AdminConfig;
pub use self::app::ServerConfig;
pub use self::logging::LoggingConfig;
pub use self::origin::OriginConfig;
pub use self::queue::QueueConfig;
pub use self::session::SessionConfig;
pub use self::store::{RedisStoreConfig, StoreConfig};
pub use self::token::TokenConfig;

use crate::error::AppError;

/// Signing algorithms accepted for position tokens.
pub const SUPPORTED_ALGORITHMS: [&str; 3] = ["HS256", "HS384", "HS512"];

/// Environment profile used when `WAITROOM_ENV` is unset.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Signing secret shipped in `config/development.toml`.
pub const DEVELOPMENT_SECRET: &str = "development-only-secret";

/// Store providers understood by the store manager.
pub const SUPPORTED_PROVIDERS: [&str; 2] = ["redis", "memory"];

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Counter store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Position token settings.
    #[serde(default)]
    pub token: TokenConfig,
    /// Session cookie settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Queue page and advancement settings.
    #[serde(default)]
    pub queue: QueueConfig,
    /// Protected origin settings.
    #[serde(default)]
    pub origin: OriginConfig,
    /// Admin API settings.
    #[serde(default)]
    pub admin: AdminConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `WAITROOM__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("WAITROOM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the service cannot run with.
    ///
    /// A missing secret is fatal: tokens can be neither issued nor verified.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.token.secret.trim().is_empty() {
            return Err(AppError::configuration(
                "token.secret must be set to sign position tokens",
            ));
        }

        if !SUPPORTED_ALGORITHMS.contains(&self.token.algorithm.as_str()) {
            return Err(AppError::configuration(format!(
                "Unsupported token algorithm '{}'. Supported: {}",
                self.token.algorithm,
                SUPPORTED_ALGORITHMS.join(", ")
            )));
        }

        if !SUPPORTED_PROVIDERS.contains(&self.store.provider.as_str()) {
            return Err(AppError::configuration(format!(
                "Unknown store provider: '{}'. Supported: {}",
                self.store.provider,
                SUPPORTED_PROVIDERS.join(", ")
            )));
        }

        if self.store.operation_timeout_ms == 0 {
            return Err(AppError::configuration(
                "store.operation_timeout_ms must be greater than zero",
            ));
        }

        if self.session.cookie_expiry_seconds == 0 {
            return Err(AppError::configuration(
                "session.cookie_expiry_seconds must be greater than zero",
            ));
        }

        if self.session.cookie_name.trim().is_empty() {
            return Err(AppError::configuration("session.cookie_name must be set"));
        }

        if self.admin.enabled
            && (!self.admin.path.starts_with('/') || self.admin.path.trim_matches('/').is_empty())
        {
            return Err(AppError::configuration(format!(
                "admin.path '{}' must be a sub-path such as '/_queue'",
                self.admin.path
            )));
        }

        Ok(())
    }

    /// Settings that are fine for local work but unsafe in production.
    pub fn startup_warnings(&self, env: &str) -> Vec<String> {
        let mut warnings = Vec::new();

        if env == DEFAULT_ENVIRONMENT {
            warnings.push(format!(
                "Running with the '{DEFAULT_ENVIRONMENT}' profile; set WAITROOM_ENV for production deployments"
            ));
        }

        if self.token.secret == DEVELOPMENT_SECRET && env != DEFAULT_ENVIRONMENT {
            warnings.push(format!(
                "token.secret is the development secret but the '{env}' profile is active"
            ));
        }

        warnings
    }
}
