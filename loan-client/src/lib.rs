//! # Loan Client SDK
//!
//! A typed Rust client for the Loan Calculator API.

use loan_types::{PaymentQuery, PaymentResult};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loan Calculator API client.
#[derive(Clone)]
pub struct LoanClient {
    base_url: String,
    http: Client,
}

impl LoanClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Calculates the monthly payment for a loan.
    pub async fn payment(
        &self,
        amount: f64,
        rate: f64,
        years: i32,
    ) -> Result<PaymentResult, ClientError> {
        let query = PaymentQuery {
            amount,
            rate,
            years,
        };
        let resp = self
            .http
            .get(format!("{}/payment", self.base_url))
            .query(&query)
            .send()
            .await?;
        self.handle_json(resp).await
    }

    /// Resets the server's request counter.
    pub async fn reset_count(&self) -> Result<(), ClientError> {
        let resp = self
            .http
            .get(format!("{}/resetCount", self.base_url))
            .send()
            .await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::api_error(status, resp).await)
        }
    }

    async fn handle_json<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(Self::api_error(status, resp).await)
        }
    }

    async fn api_error(status: reqwest::StatusCode, resp: reqwest::Response) -> ClientError {
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(body);
        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }
}
