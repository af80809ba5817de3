//! Loan request domain model.

use serde::{Deserialize, Serialize};

/// A loan to price. Transient, built per request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Principal in currency units
    pub amount: f64,
    /// Annual interest rate in percent (6.5 means 6.5%)
    pub annual_rate_percent: f64,
    /// Term in whole years
    pub term_years: i32,
}

impl LoanRequest {
    pub fn new(amount: f64, annual_rate_percent: f64, term_years: i32) -> Self {
        Self {
            amount,
            annual_rate_percent,
            term_years,
        }
    }
}
