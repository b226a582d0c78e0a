// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the quote extension gateway.
//!
//! The extension handler is the request orchestrator: it sequences
//! validation, admission control, and the provider call, fail-fast and
//! single-attempt. Every branch terminates in a typed [`ApiError`].

use crate::config::Config;
use crate::error::ApiError;
use crate::limiter::{AdmissionDecision, RateLimiter};
use crate::provider::QuoteExtender;
use crate::validator::QuoteValidator;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

/// Shared application state, constructed once at startup.
pub struct AppState {
    pub limiter: RateLimiter,
    pub validator: QuoteValidator,
    /// `None` when the provider credential was missing at startup; the
    /// endpoint then answers with a generic configuration error.
    pub provider: Option<Arc<dyn QuoteExtender>>,
    pub config: Config,
}

/// Successful extension response.
#[derive(Debug, Serialize)]
pub struct ExtendQuoteResponse {
    #[serde(rename = "originalQuote")]
    pub original_quote: String,
    #[serde(rename = "extendedQuote")]
    pub extended_quote: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/extend-quote", post(extend_quote))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "quote-extend-gateway",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Extend a quote with a meaning-inverting continuation.
///
/// Pipeline: validate -> admit -> call provider. Rejected requests
/// never reach the provider; no retries are performed here.
pub async fn extend_quote(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<ExtendQuoteResponse>, ApiError> {
    let identifier = client_identifier(&headers);

    let Json(raw) = body.map_err(|rejection| {
        debug!(identifier = %identifier, %rejection, "failed to parse request body");
        ApiError::Malformed
    })?;

    let quote = state.validator.validate(&raw)?;

    match state.limiter.check_limit(&identifier).await {
        AdmissionDecision::Allowed { remaining } => {
            debug!(identifier = %identifier, remaining, "request admitted");
        }
        AdmissionDecision::Denied { retry_after_secs } => {
            warn!(identifier = %identifier, retry_after_secs, "rate limit exceeded");
            return Err(ApiError::RateLimited { retry_after_secs });
        }
    }

    let provider = state.provider.as_ref().ok_or_else(|| {
        error!("provider credential missing; rejecting request");
        ApiError::ProviderConfig
    })?;

    let extended_quote =
        match tokio::time::timeout(state.config.provider.timeout(), provider.extend(&quote)).await
        {
            Ok(Ok(text)) => text,
            Ok(Err(err)) => {
                error!(identifier = %identifier, error = %err, "provider call failed");
                return Err(err.into());
            }
            Err(_) => {
                error!(identifier = %identifier, "provider call timed out");
                return Err(ApiError::Timeout);
            }
        };

    info!(identifier = %identifier, chars = quote.chars().count(), "quote extended");

    Ok(Json(ExtendQuoteResponse {
        original_quote: quote,
        extended_quote,
    }))
}

/// Rate-limit partition key for a request.
///
/// First `x-forwarded-for` value, else `x-real-ip`, else the shared
/// `"unknown"` bucket for clients with no identifying header.
pub fn client_identifier(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        })
        .unwrap_or("unknown")
        .to_string()
}
