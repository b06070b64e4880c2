//! Queue behaviour configuration.

use serde::{Deserialize, Serialize};

/// Queue page and advancement policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// How often the waiting-room page asks the browser to refresh.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_seconds: u64,
    /// Seconds between automatic cursor advances. `0` disables them.
    ///
    /// Only disable this when something else calls the admin API to let
    /// visitors in; otherwise they queue forever.
    #[serde(default = "default_advance_interval")]
    pub automatic_advance_interval_seconds: u64,
    /// Visitors let in per automatic advance.
    #[serde(default = "default_advance_quantity")]
    pub automatic_advance_quantity: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            refresh_interval_seconds: default_refresh_interval(),
            automatic_advance_interval_seconds: default_advance_interval(),
            automatic_advance_quantity: default_advance_quantity(),
        }
    }
}

impl QueueConfig {
    /// Whether the automatic advancer should run.
    pub fn automatic_advance_enabled(&self) -> bool {
        self.automatic_advance_interval_seconds > 0 && self.automatic_advance_quantity > 0
    }
}

fn default_refresh_interval() -> u64 {
    5
}

fn default_advance_interval() -> u64 {
    15
}

fn default_advance_quantity() -> u64 {
    5
}
