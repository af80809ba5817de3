//! Redis-backed counter shared by every replica pointing at the same store.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use loan_types::{CounterError, CounterService};
use redis::{AsyncCommands, RedisError, RedisResult, aio::ConnectionManager};

/// Key holding the shared count.
pub const COUNTER_KEY: &str = "loan-calculator";

/// Delay before the first retry; doubles on each further attempt.
const RETRY_BACKOFF: Duration = Duration::from_millis(50);

/// Counter stored under a single Redis key.
///
/// Ordering across callers comes from the atomicity of `INCR`, so no
/// client-side locking is done. The connection manager is multiplexed and
/// reconnects on its own.
#[derive(Clone)]
pub struct RedisCounter {
    conn: ConnectionManager,
    key: String,
    retry_attempts: u32,
}

impl RedisCounter {
    /// Reset baseline of the shared counter.
    pub const BASELINE: i64 = 5000;

    /// Connects to Redis and returns a counter on [`COUNTER_KEY`].
    ///
    /// `retry_attempts` is the total number of tries per command (at least 1).
    pub async fn connect(url: &str, retry_attempts: u32) -> Result<Self, CounterError> {
        let client = redis::Client::open(url)
            .map_err(|e| CounterError::Store(format!("Invalid Redis URL: {}", e)))?;
        let conn = client
            .get_connection_manager()
            .await
            .map_err(map_redis_error)?;

        tracing::info!(key = COUNTER_KEY, "connected to Redis counter store");

        Ok(Self {
            conn,
            key: COUNTER_KEY.to_string(),
            retry_attempts: retry_attempts.max(1),
        })
    }

    /// Uses a different key, e.g. to isolate concurrent test runs.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Current value without incrementing; `None` if the key does not exist.
    pub async fn current(&self) -> Result<Option<i64>, CounterError> {
        let key = self.key.as_str();
        self.with_retry("GET", is_transient, |mut conn| async move {
            conn.get::<_, Option<i64>>(key).await
        })
        .await
    }

    async fn with_retry<T, F, Fut>(
        &self,
        command: &'static str,
        retryable: fn(&RedisError) -> bool,
        mut op: F,
    ) -> Result<T, CounterError>
    where
        F: FnMut(ConnectionManager) -> Fut,
        Fut: Future<Output = RedisResult<T>>,
    {
        retry(self.retry_attempts, command, retryable, || op(self.conn.clone())).await
    }
}

#[async_trait]
impl CounterService for RedisCounter {
    async fn increment_counter(&self) -> Result<i64, CounterError> {
        let key = self.key.as_str();
        // INCR is not idempotent: only retry when it never reached the server.
        self.with_retry("INCR", RedisError::is_connection_refusal, |mut conn| async move {
            conn.incr::<_, _, i64>(key, 1).await
        })
        .await
    }

    async fn reset_count(&self) -> Result<(), CounterError> {
        let key = self.key.as_str();
        self.with_retry("SET", is_transient, |mut conn| async move {
            conn.set::<_, _, ()>(key, Self::BASELINE).await
        })
        .await?;
        tracing::debug!(key, baseline = Self::BASELINE, "Redis counter reset");
        Ok(())
    }

    fn baseline(&self) -> i64 {
        Self::BASELINE
    }
}

/// Runs `op` up to `attempts` times, retrying only errors `retryable` accepts.
async fn retry<T, F, Fut>(
    attempts: u32,
    command: &'static str,
    retryable: fn(&RedisError) -> bool,
    mut op: F,
) -> Result<T, CounterError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RedisResult<T>>,
{
    let mut attempt = 1;
    let mut backoff = RETRY_BACKOFF;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < attempts && retryable(&e) => {
                tracing::warn!(command, attempt, error = %e, "Redis command failed, retrying");
                tokio::time::sleep(backoff).await;
                attempt += 1;
                backoff *= 2;
            }
            Err(e) => {
                tracing::error!(command, attempt, error = %e, "Redis command failed");
                return Err(map_redis_error(e));
            }
        }
    }
}

fn is_transient(e: &RedisError) -> bool {
    e.is_connection_refusal() || e.is_connection_dropped() || e.is_io_error() || e.is_timeout()
}

fn map_redis_error(e: RedisError) -> CounterError {
    if is_transient(&e) {
        CounterError::StoreUnavailable(e.to_string())
    } else {
        CounterError::Store(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn refused() -> RedisError {
        io::Error::from(io::ErrorKind::ConnectionRefused).into()
    }

    fn dropped() -> RedisError {
        io::Error::from(io::ErrorKind::BrokenPipe).into()
    }

    fn not_an_integer() -> RedisError {
        (redis::ErrorKind::TypeError, "value is not an integer").into()
    }

    #[tokio::test]
    async fn test_refused_incr_is_retried_until_it_succeeds() {
        let calls = AtomicU32::new(0);
        let result = retry(3, "INCR", RedisError::is_connection_refusal, || {
            let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if call < 3 {
                    Err(refused())
                } else {
                    Ok(5001i64)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(5001));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_refused_incr_gives_up_after_attempts() {
        let calls = AtomicU32::new(0);
        let result = retry(3, "INCR", RedisError::is_connection_refusal, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<i64, _>(refused()) }
        })
        .await;

        assert!(matches!(result, Err(CounterError::StoreUnavailable(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_dropped_incr_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result = retry(3, "INCR", RedisError::is_connection_refusal, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<i64, _>(dropped()) }
        })
        .await;

        assert!(matches!(result, Err(CounterError::StoreUnavailable(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dropped_set_is_retried_up_to_attempts() {
        let calls = AtomicU32::new(0);
        let result = retry(2, "SET", is_transient, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(dropped()) }
        })
        .await;

        assert!(matches!(result, Err(CounterError::StoreUnavailable(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_store_error_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result = retry(3, "SET", is_transient, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(not_an_integer()) }
        })
        .await;

        assert!(matches!(result, Err(CounterError::Store(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_map_redis_error_by_kind() {
        assert!(matches!(
            map_redis_error(refused()),
            CounterError::StoreUnavailable(_)
        ));
        assert!(matches!(
            map_redis_error(dropped()),
            CounterError::StoreUnavailable(_)
        ));
        assert!(matches!(
            map_redis_error(not_an_integer()),
            CounterError::Store(_)
        ));
    }
}
