//! Error types for the loan calculator service.

/// Domain-level errors (business rule violations).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Counter store errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CounterError {
    /// The store could not be reached (connection refused, dropped, timed out).
    #[error("Counter store unavailable: {0}")]
    StoreUnavailable(String),

    /// The store answered, but with an error (e.g. non-integer value under the key).
    #[error("Counter store error: {0}")]
    Store(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidArgument(msg) => AppError::BadRequest(msg),
        }
    }
}

impl From<CounterError> for AppError {
    fn from(err: CounterError) -> Self {
        match err {
            CounterError::StoreUnavailable(msg) => AppError::ServiceUnavailable(msg),
            CounterError::Store(msg) => AppError::Internal(msg),
        }
    }
}
