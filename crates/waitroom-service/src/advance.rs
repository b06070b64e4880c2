//! Cursor advancement: the admin contract for letting visitors in.
//!
//! This is the only code path that writes `queue:cursor`. Every write goes
//! through [`CounterStore::advance_cursor`], which checks the length and
//! moves the cursor in one atomic step.

use std::sync::Arc;

use tracing::info;

use waitroom_core::error::AppError;
use waitroom_core::result::AppResult;
use waitroom_core::traits::CounterStore;
use waitroom_core::types::QueueSnapshot;

/// Advances the queue cursor.
#[derive(Debug, Clone)]
pub struct CursorAdvancer {
    store: Arc<dyn CounterStore>,
}

impl CursorAdvancer {
    /// Creates a new advancer.
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self { store }
    }

    /// Current counters, with the `cursor <= length` invariant checked.
    pub async fn status(&self) -> AppResult<QueueSnapshot> {
        let snapshot = self.store.snapshot().await?;
        QueueSnapshot::checked(snapshot.length, snapshot.cursor)
    }

    /// Let `amount` more visitors in. Returns the new cursor.
    ///
    /// Refuses an advance that would pass the current length; the cursor is
    /// left untouched in that case.
    pub async fn advance(&self, amount: u64) -> AppResult<u64> {
        if amount == 0 {
            return Err(AppError::validation("Advance amount must be greater than zero"));
        }

        match self.store.advance_cursor(amount).await? {
            Some(cursor) => {
                info!(amount, cursor, "Advanced queue cursor");
                Ok(cursor)
            }
            None => {
                let waiting = self.status().await?.waiting();
                Err(AppError::validation(format!(
                    "Cannot advance by {amount}: only {waiting} visitors are waiting"
                )))
            }
        }
    }

    /// Let in up to `quantity` visitors, capped at how many are waiting.
    ///
    /// Returns `None` when nobody was waiting, or when a concurrent advance
    /// admitted them first.
    pub async fn advance_up_to(&self, quantity: u64) -> AppResult<Option<u64>> {
        let amount = quantity.min(self.status().await?.waiting());
        if amount == 0 {
            return Ok(None);
        }

        let advanced = self.store.advance_cursor(amount).await?;
        if let Some(cursor) = advanced {
            info!(amount, cursor, "Advanced queue cursor");
        }
        Ok(advanced)
    }

    /// Let everybody currently waiting in. Returns the new cursor.
    pub async fn advance_all(&self) -> AppResult<u64> {
        let snapshot = self.status().await?;
        if snapshot.waiting() == 0 {
            return Ok(snapshot.cursor);
        }

        match self.store.advance_cursor(snapshot.waiting()).await? {
            Some(cursor) => {
                info!(amount = snapshot.waiting(), cursor, "Advanced queue cursor to length");
                Ok(cursor)
            }
            // Someone else advanced in between; whatever they left is current.
            None => Ok(self.status().await?.cursor),
        }
    }
}
