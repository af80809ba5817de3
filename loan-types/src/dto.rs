//! Data Transfer Objects (DTOs) for requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::LoanRequest;

/// Query parameters of `GET /payment`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentQuery {
    /// Principal in currency units
    pub amount: f64,
    /// Annual interest rate in percent
    pub rate: f64,
    /// Term in years
    pub years: i32,
}

impl From<PaymentQuery> for LoanRequest {
    fn from(q: PaymentQuery) -> Self {
        LoanRequest::new(q.amount, q.rate, q.years)
    }
}

/// Response of `GET /payment`.
///
/// `payment` is serialized as a JSON number carrying its scale (`500.00`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub amount: f64,
    pub rate: f64,
    pub years: i32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub payment: Decimal,
    /// Replica that served the request, `null` outside a multi-instance deployment
    pub instance: Option<String>,
    /// Post-increment value of the request counter
    pub count: i64,
}

impl PaymentResult {
    pub fn new(
        request: LoanRequest,
        payment: Decimal,
        instance: Option<String>,
        count: i64,
    ) -> Self {
        Self {
            amount: request.amount,
            rate: request.annual_rate_percent,
            years: request.term_years,
            payment,
            instance,
            count,
        }
    }
}
