//! Session cookie configuration.

use serde::{Deserialize, Serialize};

/// Session binding (cookie) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the position token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// How long a visitor is remembered, in seconds.
    ///
    /// After this the visitor loses their position and queues again.
    #[serde(default = "default_cookie_expiry")]
    pub cookie_expiry_seconds: u64,
    /// Mark the cookie `Secure`.
    #[serde(default)]
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_expiry_seconds: default_cookie_expiry(),
            secure_cookie: false,
        }
    }
}

fn default_cookie_name() -> String {
    "queue".to_string()
}

fn default_cookie_expiry() -> u64 {
    24 * 60 * 60
}
