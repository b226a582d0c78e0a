// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Shared test harness for the quote extension gateway.
//!
//! Provides a scriptable provider double with a call counter, and
//! builders for application state and the router under test.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use quote_extend_gateway::{
    config::{Config, ProviderConfig, RateLimitConfig, ValidationConfig},
    handlers::{router, AppState},
    limiter::RateLimiter,
    provider::{ProviderError, QuoteExtender},
    validator::QuoteValidator,
};

/// Scripted behavior for the provider double.
enum Mode {
    /// Return the given text
    Succeed(String),
    /// Fail with an empty-response error
    EmptyResponse,
    /// Never complete (exercises the caller-side timeout)
    Hang,
}

/// Provider double counting how often it is invoked.
pub struct MockExtender {
    mode: Mode,
    calls: AtomicUsize,
}

impl MockExtender {
    pub fn succeeding(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            mode: Mode::Succeed(text.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn empty_response() -> Arc<Self> {
        Arc::new(Self {
            mode: Mode::EmptyResponse,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn hanging() -> Arc<Self> {
        Arc::new(Self {
            mode: Mode::Hang,
            calls: AtomicUsize::new(0),
        })
    }

    /// Number of times `extend` was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteExtender for MockExtender {
    async fn extend(&self, _quote: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.mode {
            Mode::Succeed(text) => Ok(text.clone()),
            Mode::EmptyResponse => Err(ProviderError::EmptyResponse),
            Mode::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

/// Build a config with the given rate limit and provider timeout.
pub fn test_config(max_requests: u32, window_ms: u64, timeout_secs: u64) -> Config {
    Config {
        rate_limit: RateLimitConfig {
            max_requests,
            window_ms,
        },
        validation: ValidationConfig::default(),
        provider: ProviderConfig {
            timeout_secs,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Build application state around an optional provider double.
pub fn test_state(config: Config, provider: Option<Arc<dyn QuoteExtender>>) -> Arc<AppState> {
    Arc::new(AppState {
        limiter: RateLimiter::new(config.rate_limit.clone()),
        validator: QuoteValidator::new(config.validation.clone()),
        provider,
        config,
    })
}

/// Build the router under test with default config and a provider double.
pub fn test_app(provider: Arc<dyn QuoteExtender>) -> axum::Router {
    router(test_state(test_config(10, 60_000, 10), Some(provider)))
}
