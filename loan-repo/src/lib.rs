//! # Loan Repository
//!
//! Concrete counter store implementations (adapters) for the loan calculator.
//! This crate provides the adapters that implement the `CounterService` port:
//! an in-process atomic counter, and a Redis-backed counter shared between
//! replicas (behind the `redis` feature).

use async_trait::async_trait;
use loan_types::{CounterError, CounterService};

pub mod memory;
#[cfg(feature = "redis")]
pub mod redis_store;

pub use memory::InMemoryCounter;
#[cfg(feature = "redis")]
pub use redis_store::RedisCounter;

/// Which counter store to run with, chosen once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterBackend {
    /// Per-process counter, reset baseline 0.
    Memory,
    /// Shared counter under a well-known Redis key, reset baseline 5000.
    Redis { url: String, retry_attempts: u32 },
}

impl CounterBackend {
    pub fn name(&self) -> &'static str {
        match self {
            CounterBackend::Memory => "memory",
            CounterBackend::Redis { .. } => "redis",
        }
    }
}

/// Unified counter wrapper over the configured adapter.
pub enum Counter {
    Memory(InMemoryCounter),
    #[cfg(feature = "redis")]
    Redis(RedisCounter),
}

/// Build a counter for the given backend.
///
/// For Redis this connects eagerly, so an unreachable store fails startup.
///
/// # Examples
///
/// ```ignore
/// let counter = build_counter(&CounterBackend::Memory).await?;
///
/// // With the `redis` feature
/// let counter = build_counter(&CounterBackend::Redis {
///     url: "redis://127.0.0.1:6379".into(),
///     retry_attempts: 3,
/// })
/// .await?;
/// ```
pub async fn build_counter(backend: &CounterBackend) -> anyhow::Result<Counter> {
    match backend {
        CounterBackend::Memory => Ok(Counter::Memory(InMemoryCounter::new())),
        #[cfg(feature = "redis")]
        CounterBackend::Redis {
            url,
            retry_attempts,
        } => {
            let counter = RedisCounter::connect(url, *retry_attempts).await?;
            Ok(Counter::Redis(counter))
        }
        #[cfg(not(feature = "redis"))]
        CounterBackend::Redis { .. } => {
            anyhow::bail!("Redis counter requested but loan-repo was built without the `redis` feature")
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Implement CounterService for Counter (delegation)
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl CounterService for Counter {
    async fn increment_counter(&self) -> Result<i64, CounterError> {
        match self {
            Counter::Memory(inner) => inner.increment_counter().await,
            #[cfg(feature = "redis")]
            Counter::Redis(inner) => inner.increment_counter().await,
        }
    }

    async fn reset_count(&self) -> Result<(), CounterError> {
        match self {
            Counter::Memory(inner) => inner.reset_count().await,
            #[cfg(feature = "redis")]
            Counter::Redis(inner) => inner.reset_count().await,
        }
    }

    fn baseline(&self) -> i64 {
        match self {
            Counter::Memory(inner) => inner.baseline(),
            #[cfg(feature = "redis")]
            Counter::Redis(inner) => inner.baseline(),
        }
    }
}
