//! # Loan Types
//!
//! Domain types and port traits for the loan calculator service.
//! This crate has ZERO external IO dependencies - only data structures,
//! the payment formula, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (LoanRequest, PaymentCalculator)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{LoanRequest, PaymentCalculator};
pub use dto::*;
pub use error::{AppError, CounterError, DomainError};
pub use ports::CounterService;
pub use rust_decimal::Decimal;
