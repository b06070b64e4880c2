//! In-memory counter store using atomics in a dashmap.
//!
//! Counters live in this process only, so several server instances would
//! each hand out the same positions. Use Redis for anything but a single
//! development instance or tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use waitroom_core::error::AppError;
use waitroom_core::result::AppResult;
use waitroom_core::traits::CounterStore;
use waitroom_core::types::{Counter, QueueSnapshot};

/// In-memory counter store.
#[derive(Debug, Clone, Default)]
pub struct MemoryCounterStore {
    counters: Arc<DashMap<Counter, AtomicU64>>,
}

impl MemoryCounterStore {
    /// Create an empty store (both counters read as 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with preset counter values.
    pub fn with_values(length: u64, cursor: u64) -> Self {
        let store = Self::new();
        store.counters.insert(Counter::Length, AtomicU64::new(length));
        store.counters.insert(Counter::Cursor, AtomicU64::new(cursor));
        store
    }

    fn load(&self, counter: Counter) -> u64 {
        self.counters
            .get(&counter)
            .map(|v| v.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Swap the cursor from `current` to `next`. No other map guard may be
    /// held while this runs.
    fn swap_cursor(&self, current: u64, next: u64) -> bool {
        let entry = self
            .counters
            .entry(Counter::Cursor)
            .or_insert_with(|| AtomicU64::new(0));
        entry
            .value()
            .compare_exchange(current, next, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn read(&self, counter: Counter) -> AppResult<u64> {
        Ok(self.load(counter))
    }

    async fn increment(&self, counter: Counter, amount: u64) -> AppResult<u64> {
        let entry = self
            .counters
            .entry(counter)
            .or_insert_with(|| AtomicU64::new(0));
        let previous = entry.value().fetch_add(amount, Ordering::SeqCst);
        previous
            .checked_add(amount)
            .ok_or_else(|| AppError::integrity(format!("Counter '{counter}' overflowed")))
    }

    async fn advance_cursor(&self, amount: u64) -> AppResult<Option<u64>> {
        loop {
            let cursor = self.load(Counter::Cursor);
            let length = self.load(Counter::Length);
            let next = cursor
                .checked_add(amount)
                .ok_or_else(|| AppError::integrity("Counter 'cursor' overflowed"))?;
            if next > length {
                return Ok(None);
            }
            // The length never shrinks, so it still covers `next` if the
            // cursor has not moved since it was read.
            if self.swap_cursor(cursor, next) {
                return Ok(Some(next));
            }
        }
    }

    async fn snapshot(&self) -> AppResult<QueueSnapshot> {
        // Cursor first: both counters only grow and the cursor never passes
        // the length, so a later length read always covers it.
        let cursor = self.load(Counter::Cursor);
        let length = self.load(Counter::Length);
        Ok(QueueSnapshot { length, cursor })
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_reads_zero() {
        let store = MemoryCounterStore::new();
        assert_eq!(store.read(Counter::Cursor).await.unwrap(), 0);
        assert_eq!(store.snapshot().await.unwrap(), QueueSnapshot::default());
    }

    #[tokio::test]
    async fn test_increment_returns_post_value() {
        let store = MemoryCounterStore::new();
        assert_eq!(store.increment(Counter::Length, 1).await.unwrap(), 1);
        assert_eq!(store.increment(Counter::Length, 1).await.unwrap(), 2);
        assert_eq!(store.increment(Counter::Cursor, 5).await.unwrap(), 5);
        assert_eq!(store.read(Counter::Length).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_with_values() {
        let store = MemoryCounterStore::with_values(10, 4);
        let snap = store.snapshot().await.unwrap();
        assert_eq!(snap.length, 10);
        assert_eq!(snap.cursor, 4);
    }

    #[tokio::test]
    async fn test_advance_cursor_is_bounded_by_length() {
        let store = MemoryCounterStore::with_values(10, 5);
        assert_eq!(store.advance_cursor(6).await.unwrap(), None);
        assert_eq!(store.read(Counter::Cursor).await.unwrap(), 5);
        assert_eq!(store.advance_cursor(5).await.unwrap(), Some(10));
        assert_eq!(store.advance_cursor(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_advance_cursor_on_empty_store() {
        let store = MemoryCounterStore::new();
        assert_eq!(store.advance_cursor(1).await.unwrap(), None);
        store.increment(Counter::Length, 2).await.unwrap();
        assert_eq!(store.advance_cursor(2).await.unwrap(), Some(2));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_advances_never_pass_length() {
        let store = MemoryCounterStore::with_values(10, 5);
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.advance_cursor(5).await.unwrap()
            }));
        }

        let mut granted = 0;
        for handle in handles {
            if handle.await.unwrap().is_some() {
                granted += 1;
            }
        }

        assert_eq!(granted, 1);
        assert_eq!(store.snapshot().await.unwrap(), QueueSnapshot { length: 10, cursor: 10 });
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_snapshots_never_see_cursor_past_length() {
        let store = MemoryCounterStore::new();

        let writer = {
            let store = store.clone();
            tokio::spawn(async move {
                for _ in 0..20_000 {
                    store.increment(Counter::Length, 1).await.unwrap();
                    assert!(store.advance_cursor(1).await.unwrap().is_some());
                }
            })
        };

        let mut readers = Vec::new();
        for _ in 0..3 {
            let store = store.clone();
            readers.push(tokio::spawn(async move {
                let mut torn = 0u64;
                for _ in 0..20_000 {
                    let snap = store.snapshot().await.unwrap();
                    if snap.cursor > snap.length {
                        torn += 1;
                    }
                }
                torn
            }));
        }

        writer.await.unwrap();
        for reader in readers {
            assert_eq!(reader.await.unwrap(), 0);
        }
        assert_eq!(
            store.snapshot().await.unwrap(),
            QueueSnapshot { length: 20_000, cursor: 20_000 }
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_unique() {
        let store = MemoryCounterStore::with_values(7, 0);
        let mut handles = Vec::new();
        for _ in 0..64 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.increment(Counter::Length, 1).await.unwrap()
            }));
        }

        let mut values = Vec::new();
        for handle in handles {
            values.push(handle.await.unwrap());
        }
        values.sort_unstable();

        let expected: Vec<u64> = (8..=71).collect();
        assert_eq!(values, expected);
    }
}
