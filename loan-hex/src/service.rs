//! Loan Application Service
//!
//! Sequences the payment calculation and the counter increment.
//! Contains NO infrastructure logic - pure orchestration.

use loan_types::{AppError, CounterService, LoanRequest, PaymentCalculator, PaymentResult};

/// Application service for loan payment requests.
///
/// Generic over `C: CounterService` - the counter store is injected at compile time.
/// This enables:
/// - Swapping the in-memory and Redis counters by configuration
/// - Testing with mock counters
pub struct LoanService<C: CounterService> {
    counter: C,
    calculator: PaymentCalculator,
    instance: Option<String>,
}

impl<C: CounterService> LoanService<C> {
    /// Creates a new loan service with the given counter and no instance id.
    pub fn new(counter: C) -> Self {
        Self {
            counter,
            calculator: PaymentCalculator::new(),
            instance: None,
        }
    }

    /// Sets the identifier reported as `instance` in every result.
    pub fn with_instance(mut self, instance: Option<String>) -> Self {
        self.instance = instance;
        self
    }

    /// Returns a reference to the underlying counter.
    pub fn counter(&self) -> &C {
        &self.counter
    }

    pub fn instance(&self) -> Option<&str> {
        self.instance.as_deref()
    }

    /// Prices the loan and records the call.
    ///
    /// The payment is computed first, so a rejected request does not consume a count.
    pub async fn calculate_payment(&self, req: LoanRequest) -> Result<PaymentResult, AppError> {
        let payment = self
            .calculator
            .calculate(req.amount, req.annual_rate_percent, req.term_years)?;

        let count = self.counter.increment_counter().await?;

        Ok(PaymentResult::new(req, payment, self.instance.clone(), count))
    }

    /// Resets the counter to its store-specific baseline.
    pub async fn reset_count(&self) -> Result<(), AppError> {
        self.counter.reset_count().await?;
        tracing::info!(baseline = self.counter.baseline(), "counter reset");
        Ok(())
    }
}
