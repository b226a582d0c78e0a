// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Quote Extension Gateway
//!
//! A single-endpoint gateway that extends a user-supplied quote with a
//! continuation inverting its meaning, via the Gemini API:
//!
//! - Per-client fixed-window rate limiting (10 requests / 60s default)
//! - Payload validation (non-empty, max 500 characters)
//! - Provider call with caller-side timeout and typed error taxonomy

pub mod config;
pub mod error;
pub mod handlers;
pub mod limiter;
pub mod provider;
pub mod validator;

pub use config::Config;
pub use error::ApiError;
pub use handlers::{router, AppState};
pub use limiter::{AdmissionDecision, RateLimiter};
pub use provider::{GeminiClient, ProviderError, QuoteExtender};
pub use validator::{QuoteValidator, ValidationError};
