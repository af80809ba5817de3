//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use loan_types::{AppError, CounterService, PaymentQuery};

use crate::LoanService;

/// Application state shared across handlers.
pub struct AppState<C: CounterService> {
    pub service: LoanService<C>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        if status.is_server_error() {
            tracing::error!(%status, "request failed: {}", message);
        }

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Calculate a loan payment.
///
/// `GET /payment?amount=200000&rate=6.5&years=30`
#[tracing::instrument(skip(state, query))]
pub async fn payment<C: CounterService>(
    State(state): State<Arc<AppState<C>>>,
    query: Result<Query<PaymentQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    tracing::debug!(
        amount = params.amount,
        rate = params.rate,
        years = params.years,
        "calculating payment"
    );

    let result = state.service.calculate_payment(params.into()).await?;
    Ok(Json(result))
}

/// Reset the request counter.
#[tracing::instrument(skip(state))]
pub async fn reset_count<C: CounterService>(
    State(state): State<Arc<AppState<C>>>,
) -> Result<&'static str, ApiError> {
    state.service.reset_count().await?;
    Ok("OK")
}
