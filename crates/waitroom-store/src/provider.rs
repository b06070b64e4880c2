//! Store manager that dispatches to the configured provider.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use waitroom_core::config::StoreConfig;
use waitroom_core::error::AppError;
use waitroom_core::result::AppResult;
use waitroom_core::traits::CounterStore;
use waitroom_core::types::{Counter, QueueSnapshot};

/// Store manager that wraps the configured counter store.
///
/// Every call is bounded by the operation timeout; an expired call becomes a
/// `ServiceUnavailable` error. Nothing is retried here.
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// The inner counter store.
    inner: Arc<dyn CounterStore>,
    /// Upper bound for a single call.
    timeout: Duration,
}

impl StoreManager {
    /// Create a new store manager from configuration.
    pub async fn new(config: &StoreConfig) -> AppResult<Self> {
        let inner: Arc<dyn CounterStore> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis counter store");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Arc::new(crate::redis::RedisCounterStore::new(client))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                warn!("Using in-memory counter store; positions are only unique within this process");
                Arc::new(crate::memory::MemoryCounterStore::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown store provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self {
            inner,
            timeout: Duration::from_millis(config.operation_timeout_ms),
        })
    }

    /// Create a store manager from an existing store (for testing).
    pub fn from_store(store: Arc<dyn CounterStore>, timeout: Duration) -> Self {
        Self {
            inner: store,
            timeout,
        }
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = AppResult<T>> + Send,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Counter store call timed out"
                );
                Err(AppError::service_unavailable(format!(
                    "Counter store {operation} timed out after {}ms",
                    self.timeout.as_millis()
                )))
            }
        }
    }
}

#[async_trait]
impl CounterStore for StoreManager {
    async fn read(&self, counter: Counter) -> AppResult<u64> {
        self.bounded("read", self.inner.read(counter)).await
    }

    async fn increment(&self, counter: Counter, amount: u64) -> AppResult<u64> {
        self.bounded("increment", self.inner.increment(counter, amount))
            .await
    }

    async fn advance_cursor(&self, amount: u64) -> AppResult<Option<u64>> {
        self.bounded("advance_cursor", self.inner.advance_cursor(amount))
            .await
    }

    async fn snapshot(&self) -> AppResult<QueueSnapshot> {
        self.bounded("snapshot", self.inner.snapshot()).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.bounded("health_check", self.inner.health_check()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waitroom_core::error::ErrorKind;

    /// A store that never answers in time.
    #[derive(Debug)]
    struct StalledStore;

    #[async_trait]
    impl CounterStore for StalledStore {
        async fn read(&self, _counter: Counter) -> AppResult<u64> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(0)
        }

        async fn increment(&self, _counter: Counter, _amount: u64) -> AppResult<u64> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(1)
        }

        async fn advance_cursor(&self, _amount: u64) -> AppResult<Option<u64>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(None)
        }

        async fn snapshot(&self) -> AppResult<QueueSnapshot> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(QueueSnapshot::default())
        }

        async fn health_check(&self) -> AppResult<bool> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(true)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_maps_to_service_unavailable() {
        let manager = StoreManager::from_store(Arc::new(StalledStore), Duration::from_millis(50));
        let err = manager.increment(Counter::Length, 1).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
        assert!(err.kind.is_transient());
    }

    #[tokio::test(start_paused = true)]
    async fn test_advance_cursor_is_bounded_by_timeout() {
        let manager = StoreManager::from_store(Arc::new(StalledStore), Duration::from_millis(50));
        let err = manager.advance_cursor(1).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
    }

    #[tokio::test]
    async fn test_memory_provider_from_config() {
        let config = StoreConfig {
            provider: "memory".to_string(),
            ..StoreConfig::default()
        };
        let manager = StoreManager::new(&config).await.unwrap();
        assert_eq!(manager.increment(Counter::Length, 1).await.unwrap(), 1);
        assert!(manager.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_provider() {
        let config = StoreConfig {
            provider: "etcd".to_string(),
            ..StoreConfig::default()
        };
        let err = StoreManager::new(&config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
