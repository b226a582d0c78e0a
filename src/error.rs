// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error taxonomy for the extension endpoint.
//!
//! Every failure path terminates in one [`ApiError`] variant with a
//! fixed HTTP mapping. Server-side variants deliberately surface only
//! generic messages; configuration detail never reaches the client.

use crate::provider::ProviderError;
use crate::validator::ValidationError;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Typed outcome for every failing request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request body")]
    Malformed,

    #[error("Quote is required and must be a string")]
    MissingQuote,

    #[error("Quote cannot be empty")]
    EmptyQuote,

    #[error("Quote must not exceed {max} characters")]
    QuoteTooLong { max: usize },

    #[error("Too many requests. Please try again later.")]
    RateLimited { retry_after_secs: u64 },

    #[error("Service configuration error. Please contact support.")]
    ProviderConfig,

    #[error("Failed to generate quote extension. Please try again.")]
    Provider,

    #[error("Quote extension timed out. Please try again.")]
    Timeout,

    #[error("An unexpected error occurred. Please try again.")]
    Unexpected,
}

/// JSON error body, camelCase to match the original wire contract.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(rename = "retryAfter", skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Malformed | Self::MissingQuote | Self::EmptyQuote | Self::QuoteTooLong { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::ProviderConfig | Self::Provider | Self::Timeout | Self::Unexpected => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingQuote => Self::MissingQuote,
            ValidationError::Empty => Self::EmptyQuote,
            ValidationError::TooLong { max, .. } => Self::QuoteTooLong { max },
        }
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        if err.is_config() {
            Self::ProviderConfig
        } else {
            Self::Provider
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let retry_after = match self {
            Self::RateLimited { retry_after_secs } => Some(retry_after_secs),
            _ => None,
        };
        let body = Json(ErrorResponse {
            error: self.to_string(),
            retry_after,
        });

        match retry_after {
            Some(secs) => {
                (status, [(header::RETRY_AFTER, secs.to_string())], body).into_response()
            }
            None => (status, body).into_response(),
        }
    }
}
