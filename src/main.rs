// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Quote Extension Gateway Service
//!
//! Accepts `POST /api/extend-quote` with `{"quote": "..."}`, applies a
//! per-client fixed-window rate limit, and returns the quote extended
//! with a meaning-inverting continuation generated by Gemini.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `GEMINI_API_KEY`: Provider credential (required for the endpoint
//!   to serve successful responses)
//! - `RATE_LIMIT_REQUESTS`: Max requests per window per client (default: 10)
//! - `RATE_LIMIT_WINDOW_MS`: Window length in milliseconds (default: 60000)
//! - `PROVIDER_TIMEOUT_SECS`: Caller-side provider timeout (default: 10)

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quote_extend_gateway::{
    config::Config,
    handlers::{router, AppState},
    limiter::RateLimiter,
    provider::{GeminiClient, QuoteExtender},
    validator::QuoteValidator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = load_config();
    info!(
        bind_addr = %config.bind_addr,
        max_requests = config.rate_limit.max_requests,
        window_ms = config.rate_limit.window_ms,
        model = %config.provider.model,
        "Starting quote extension gateway"
    );

    // Provider credential is checked once here; the service still
    // starts without it and answers 500 until it is configured.
    let provider: Option<Arc<dyn QuoteExtender>> =
        match GeminiClient::from_env(config.provider.clone()) {
            Ok(client) => Some(Arc::new(client)),
            Err(err) => {
                error!(error = %err, "provider not configured");
                None
            }
        };

    // Create application state
    let state = Arc::new(AppState {
        limiter: RateLimiter::new(config.rate_limit.clone()),
        validator: QuoteValidator::new(config.validation.clone()),
        provider,
        config: config.clone(),
    });

    // Build router
    let app = router(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Load configuration from environment variables.
fn load_config() -> Config {
    Config {
        bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        rate_limit: quote_extend_gateway::config::RateLimitConfig {
            max_requests: std::env::var("RATE_LIMIT_REQUESTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            window_ms: std::env::var("RATE_LIMIT_WINDOW_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60_000),
        },
        provider: quote_extend_gateway::config::ProviderConfig {
            timeout_secs: std::env::var("PROVIDER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            ..Default::default()
        },
        ..Default::default()
    }
}
