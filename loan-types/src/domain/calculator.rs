//! Fixed-rate amortized monthly payment calculation.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::DomainError;

/// Number of monthly payments in one year of term.
pub const MONTHS_PER_YEAR: i32 = 12;

/// Fractional digits of a currency amount.
const MONEY_SCALE: u32 = 2;

/// Computes the fixed monthly payment that repays a loan over its term.
///
/// Stateless; a single value can be shared across tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentCalculator;

impl PaymentCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Returns the monthly payment rounded half-up to exactly 2 decimals.
    ///
    /// # Validation
    /// - `amount` must be finite and positive
    /// - `annual_rate_percent` must be finite and non-negative
    /// - `term_years` must be positive
    pub fn calculate(
        &self,
        amount: f64,
        annual_rate_percent: f64,
        term_years: i32,
    ) -> Result<Decimal, DomainError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(DomainError::InvalidArgument(
                "amount must be a positive number".into(),
            ));
        }
        if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
            return Err(DomainError::InvalidArgument(
                "rate must be a non-negative number".into(),
            ));
        }
        if term_years <= 0 {
            return Err(DomainError::InvalidArgument(
                "years must be a positive integer".into(),
            ));
        }

        let number_of_payments = term_years
            .checked_mul(MONTHS_PER_YEAR)
            .ok_or_else(|| DomainError::InvalidArgument("years is too large".into()))?;

        let payment = if annual_rate_percent == 0.0 {
            amount / f64::from(number_of_payments)
        } else {
            let monthly_rate = annual_rate_percent / 100.0 / 12.0;
            (monthly_rate * amount)
                / (1.0 - (1.0 + monthly_rate).powf(-f64::from(number_of_payments)))
        };

        to_money(payment)
    }
}

/// Converts the exact binary value to a decimal and rounds half-up to cents.
fn to_money(value: f64) -> Result<Decimal, DomainError> {
    if !value.is_finite() {
        return Err(DomainError::InvalidArgument(
            "payment is not a finite number".into(),
        ));
    }

    let mut money = Decimal::from_f64_retain(value)
        .ok_or_else(|| DomainError::InvalidArgument("payment is out of range".into()))?
        .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    money.rescale(MONEY_SCALE);
    // rescale settles for a smaller scale when the mantissa is full
    if money.scale() != MONEY_SCALE {
        return Err(DomainError::InvalidArgument("payment is out of range".into()));
    }
    Ok(money)
}
