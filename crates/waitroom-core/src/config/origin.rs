//! Protected origin configuration.

use serde::{Deserialize, Serialize};

/// The backend whose content the queue protects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OriginConfig {
    /// Base URL of the protected origin.
    #[serde(default = "default_url")]
    pub url: String,
    /// Request timeout towards the origin in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Largest request body forwarded, in bytes.
    #[serde(default = "default_max_body")]
    pub max_body_bytes: usize,
    /// Paths served from the origin regardless of queue state.
    #[serde(default = "default_allowed_paths")]
    pub allowed_paths: Vec<String>,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_seconds: default_timeout(),
            max_body_bytes: default_max_body(),
            allowed_paths: default_allowed_paths(),
        }
    }
}

impl OriginConfig {
    /// Whether `path` bypasses the queue.
    pub fn is_allowed(&self, path: &str) -> bool {
        self.allowed_paths.iter().any(|p| p == path)
    }
}

fn default_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_body() -> usize {
    10 * 1024 * 1024
}

fn default_allowed_paths() -> Vec<String> {
    vec!["/robots.txt".to_string(), "/favicon.ico".to_string()]
}
