//! Position token signing configuration.

use serde::{Deserialize, Serialize};

/// Position token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// HMAC secret used to sign and verify position tokens. Required.
    #[serde(default)]
    pub secret: String,
    /// JWS algorithm name: `"HS256"`, `"HS384"` or `"HS512"`.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            algorithm: default_algorithm(),
        }
    }
}

fn default_algorithm() -> String {
    "HS256".to_string()
}
