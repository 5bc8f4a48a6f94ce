//! Error types for the decorators and the webhook receiver
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Boxed error produced by a wrapped function.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// == Decorator Error Enum ==
/// Unified error type for the decorator framework.
#[derive(Error, Debug)]
pub enum DecoratorError {
    /// The wrapped function itself failed; the original error is kept intact
    #[error("{0}")]
    Function(#[source] BoxError),

    /// Every retry attempt failed
    #[error("All {attempts} attempts failed, last error: {last_error}")]
    RetryExhausted { attempts: u32, last_error: String },

    /// Too many calls inside the rate-limit window
    #[error("Rate limit exceeded: more than {max_calls} calls within {window:?}")]
    RateLimitExceeded { max_calls: usize, window: Duration },

    /// Arguments could not be turned into a cache key
    #[error("Cache key error: {0}")]
    CacheKey(String),

    /// Decorator constructed with unusable parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Result could not be serialized into a webhook payload
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Webhook request failed or returned a non-JSON/non-success response
    #[error("Webhook error: {0}")]
    Webhook(#[from] reqwest::Error),
}

impl DecoratorError {
    /// Wraps an error raised by the decorated function.
    pub fn function<E: Into<BoxError>>(err: E) -> Self {
        DecoratorError::Function(err.into())
    }

    /// Returns true for `RateLimitExceeded`.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, DecoratorError::RateLimitExceeded { .. })
    }
}

// == Result Type Alias ==
/// Convenience Result type for the decorators.
pub type Result<T> = std::result::Result<T, DecoratorError>;

// == Receiver Error Enum ==
/// Errors returned by the webhook receiver HTTP service.
#[derive(Error, Debug)]
pub enum ReceiverError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ReceiverError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ReceiverError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
