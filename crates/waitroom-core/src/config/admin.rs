//! Admin API configuration.

use serde::{Deserialize, Serialize};

/// Admin interface configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Whether the admin routes are mounted.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Path prefix for the admin routes.
    #[serde(default = "default_path")]
    pub path: String,
    /// Password for HTTP Basic auth with user `admin`.
    ///
    /// Without one, anybody who finds the path can skip the queue.
    #[serde(default)]
    pub password: Option<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_path(),
            password: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_path() -> String {
    "/_queue".to_string()
}
