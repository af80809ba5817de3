//! Domain models for the loan calculator service.

pub mod calculator;
pub mod loan;

pub use calculator::PaymentCalculator;
pub use loan::LoanRequest;
