//! # Loan Hex
//!
//! Application service layer and HTTP adapter for the loan calculator.
//!
//! ## Architecture
//!
//! - `service/` - Application service (prices a loan, bumps the counter)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `C: CounterService`, allowing
//! different counter stores to be injected.

pub mod inbound;
pub mod service;


pub use service::LoanService;
