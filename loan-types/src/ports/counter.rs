//! Request counter port trait.
//!
//! Adapters (InMemory, Redis) implement this trait.

use std::sync::Arc;

use crate::error::CounterError;

/// Monotonic request counter.
///
/// Increments MUST be atomic: concurrent callers never observe the same
/// post-increment value.
#[async_trait::async_trait]
pub trait CounterService: Send + Sync + 'static {
    /// Adds 1 and returns the new value.
    async fn increment_counter(&self) -> Result<i64, CounterError>;

    /// Sets the counter back to [`CounterService::baseline`].
    async fn reset_count(&self) -> Result<(), CounterError>;

    /// Value held right after a reset.
    fn baseline(&self) -> i64;
}

#[async_trait::async_trait]
impl<T: CounterService> CounterService for Arc<T> {
    async fn increment_counter(&self) -> Result<i64, CounterError> {
        (**self).increment_counter().await
    }

    async fn reset_count(&self) -> Result<(), CounterError> {
        (**self).reset_count().await
    }

    fn baseline(&self) -> i64 {
        (**self).baseline()
    }
}
