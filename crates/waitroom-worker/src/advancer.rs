//! Automatic advancer: ticks on an interval and advances the cursor.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};

use waitroom_core::config::QueueConfig;
use waitroom_service::CursorAdvancer;

/// Periodically admits `quantity` visitors.
#[derive(Debug)]
pub struct AutoAdvancer {
    /// Cursor writer.
    advancer: CursorAdvancer,
    /// Time between advances.
    interval: Duration,
    /// Visitors admitted per advance.
    quantity: u64,
}

impl AutoAdvancer {
    /// Create an advancer from queue configuration.
    ///
    /// Returns `None` when automatic advancement is disabled.
    pub fn from_config(advancer: CursorAdvancer, config: &QueueConfig) -> Option<Self> {
        if !config.automatic_advance_enabled() {
            return None;
        }
        Some(Self {
            advancer,
            interval: Duration::from_secs(config.automatic_advance_interval_seconds),
            quantity: config.automatic_advance_quantity,
        })
    }

    /// Run one advance. Errors are logged; the next tick tries again.
    pub async fn tick(&self) -> Option<u64> {
        match self.advancer.advance_up_to(self.quantity).await {
            Ok(Some(cursor)) => {
                tracing::debug!(cursor, quantity = self.quantity, "Automatic advance");
                Some(cursor)
            }
            Ok(None) => {
                tracing::trace!("Nobody waiting, skipping automatic advance");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Automatic advance failed");
                None
            }
        }
    }

    /// Run until the cancel signal is received.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(
            "Automatic advancer started: {} visitors every {}s",
            self.quantity,
            self.interval.as_secs()
        );

        let mut ticker = time::interval_at(time::Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        tracing::info!("Automatic advancer received shutdown signal");
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.tick().await;
                }
            }
        }

        tracing::info!("Automatic advancer shut down");
    }
}
