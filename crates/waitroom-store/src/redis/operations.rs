//! Redis counter store implementation.

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use waitroom_core::error::{AppError, ErrorKind};
use waitroom_core::result::AppResult;
use waitroom_core::traits::CounterStore;
use waitroom_core::types::{Counter, QueueSnapshot};

use super::client::RedisClient;
use crate::keys;

/// Lua script: `INCRBY` the cursor only if it stays within the length.
///
/// Returns the new cursor, or -1 when not enough visitors are waiting.
const ADVANCE_CURSOR_SCRIPT: &str = r#"
    local length_key = KEYS[1]
    local cursor_key = KEYS[2]
    local amount = tonumber(ARGV[1])

    local length = tonumber(redis.call('GET', length_key) or '0')
    local cursor = tonumber(redis.call('GET', cursor_key) or '0')

    if cursor + amount > length then
        return -1
    end

    return redis.call('INCRBY', cursor_key, amount)
"#;

/// Redis-backed counter store. `INCRBY` provides the atomicity.
#[derive(Debug, Clone)]
pub struct RedisCounterStore {
    /// Redis client.
    client: RedisClient,
}

impl RedisCounterStore {
    /// Create a new Redis counter store.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Store, format!("Redis error: {e}"), e)
    }

    /// Parse a stored counter. Missing keys read as 0.
    fn parse(key: &str, raw: Option<String>) -> AppResult<u64> {
        match raw {
            None => Ok(0),
            Some(value) => value.trim().parse::<u64>().map_err(|_| {
                AppError::integrity(format!("Key '{key}' holds a non-counter value '{value}'"))
            }),
        }
    }

    /// Interpret the advance script's reply.
    fn advance_result(key: &str, result: i64) -> AppResult<Option<u64>> {
        match result {
            -1 => Ok(None),
            value => u64::try_from(value)
                .map(Some)
                .map_err(|_| AppError::integrity(format!("Key '{key}' went negative: {value}"))),
        }
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn read(&self, counter: Counter) -> AppResult<u64> {
        let key = self.client.key(counter);
        let mut conn = self.client.conn_mut();
        let raw: Option<String> = conn.get(&key).await.map_err(Self::map_err)?;
        Self::parse(&key, raw)
    }

    async fn increment(&self, counter: Counter, amount: u64) -> AppResult<u64> {
        let key = self.client.key(counter);
        let amount = i64::try_from(amount)
            .map_err(|_| AppError::validation(format!("Increment {amount} is too large")))?;
        let mut conn = self.client.conn_mut();
        let value: i64 = conn.incr(&key, amount).await.map_err(Self::map_err)?;
        debug!(key = %key, amount, value, "Incremented counter");
        u64::try_from(value)
            .map_err(|_| AppError::integrity(format!("Key '{key}' went negative: {value}")))
    }

    async fn advance_cursor(&self, amount: u64) -> AppResult<Option<u64>> {
        let [length_key, cursor_key] = keys::snapshot_keys(self.client.prefix());
        let amount = i64::try_from(amount)
            .map_err(|_| AppError::validation(format!("Advance {amount} is too large")))?;
        let mut conn = self.client.conn_mut();

        let result: i64 = redis::Script::new(ADVANCE_CURSOR_SCRIPT)
            .key(&length_key)
            .key(&cursor_key)
            .arg(amount)
            .invoke_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        Self::advance_result(&cursor_key, result)
    }

    async fn snapshot(&self) -> AppResult<QueueSnapshot> {
        let [length_key, cursor_key] = keys::snapshot_keys(self.client.prefix());
        let mut conn = self.client.conn_mut();
        let values: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&length_key)
            .arg(&cursor_key)
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        let mut values = values.into_iter();
        let length = Self::parse(&length_key, values.next().flatten())?;
        let cursor = Self::parse(&cursor_key, values.next().flatten())?;
        Ok(QueueSnapshot { length, cursor })
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}
