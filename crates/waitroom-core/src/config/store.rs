//! Counter store configuration.

use serde::{Deserialize, Serialize};

/// Top-level counter store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store provider: `"redis"` or `"memory"`.
    ///
    /// `memory` keeps the counters inside one process and is only suitable
    /// for development and tests.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Upper bound for a single store call in milliseconds.
    #[serde(default = "default_operation_timeout")]
    pub operation_timeout_ms: u64,
    /// Redis-specific configuration.
    #[serde(default)]
    pub redis: RedisStoreConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            operation_timeout_ms: default_operation_timeout(),
            redis: RedisStoreConfig::default(),
        }
    }
}

/// Redis backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisStoreConfig {
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Prefix prepended to `queue:length` and `queue:cursor`.
    #[serde(default)]
    pub key_prefix: String,
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            key_prefix: String::new(),
        }
    }
}

fn default_provider() -> String {
    "redis".to_string()
}

fn default_operation_timeout() -> u64 {
    2000
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}
