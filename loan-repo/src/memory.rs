//! In-process counter.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use loan_types::{CounterError, CounterService};

/// Counter owned by a single process, starting at 0.
///
/// Each replica keeps its own independent count.
#[derive(Debug, Default)]
pub struct InMemoryCounter {
    count: AtomicI64,
}

impl InMemoryCounter {
    pub const BASELINE: i64 = 0;

    pub fn new() -> Self {
        Self {
            count: AtomicI64::new(Self::BASELINE),
        }
    }

    /// Current value without incrementing.
    pub fn current(&self) -> i64 {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CounterService for InMemoryCounter {
    async fn increment_counter(&self) -> Result<i64, CounterError> {
        Ok(self.count.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn reset_count(&self) -> Result<(), CounterError> {
        self.count.store(Self::BASELINE, Ordering::SeqCst);
        tracing::debug!(baseline = Self::BASELINE, "in-memory counter reset");
        Ok(())
    }

    fn baseline(&self) -> i64 {
        Self::BASELINE
    }
}
