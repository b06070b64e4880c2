//! Counter store trait for pluggable queue-state backends.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{Counter, QueueSnapshot};

/// Atomic counter backend holding `queue:length` and `queue:cursor`.
///
/// Both `read` and `increment` must be linearizable per key under
/// concurrent callers. Position uniqueness rests entirely on `increment`,
/// and `cursor <= length` rests on `advance_cursor`.
#[async_trait]
pub trait CounterStore: Send + Sync + std::fmt::Debug + 'static {
    /// Read a counter. A missing key reads as 0.
    async fn read(&self, counter: Counter) -> AppResult<u64>;

    /// Atomically add `amount` to a counter. Returns the post-increment value.
    async fn increment(&self, counter: Counter, amount: u64) -> AppResult<u64>;

    /// Atomically add `amount` to the cursor unless that would pass the length.
    ///
    /// Returns the new cursor, or `None` when fewer than `amount` visitors
    /// are waiting. The check and the write must be a single atomic step.
    async fn advance_cursor(&self, amount: u64) -> AppResult<Option<u64>>;

    /// Read both counters in a single round trip.
    ///
    /// Implementations return the raw values; invariant checking is left to
    /// [`QueueSnapshot::checked`].
    async fn snapshot(&self) -> AppResult<QueueSnapshot>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
