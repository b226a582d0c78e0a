// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the quote extension gateway.
//!
//! All values can be overridden through environment variables; the
//! variable names (`RATE_LIMIT_REQUESTS`, `RATE_LIMIT_WINDOW_MS`,
//! `GEMINI_API_KEY`) match the original deployment. Configuration is
//! loaded once at startup and fixed for the process lifetime.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the gateway service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Payload validation configuration
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Text-generation provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Fixed-window rate limiting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum requests per window per client identifier (default: 10)
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in milliseconds (default: 60000)
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
}

/// Validation configuration for quote payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maximum quote length in Unicode characters, after trimming (default: 500)
    #[serde(default = "default_max_quote_chars")]
    pub max_quote_chars: usize,
}

/// Gemini provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API base URL (default: Gemini v1beta endpoint)
    #[serde(default = "default_provider_base_url")]
    pub base_url: String,

    /// Model identifier (default: gemini-2.5-flash)
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature, biased low for deterministic-leaning output
    /// (default: 0.6)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Caller-side timeout for a single provider call in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_requests() -> u32 {
    10
}

fn default_window_ms() -> u64 {
    60_000
}

fn default_max_quote_chars() -> usize {
    500
}

fn default_provider_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.6
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            rate_limit: RateLimitConfig::default(),
            validation: ValidationConfig::default(),
            provider: ProviderConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_ms: default_window_ms(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_quote_chars: default_max_quote_chars(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RateLimitConfig {
    /// Get the rate window duration
    pub fn window_duration(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

impl ProviderConfig {
    /// Get the caller-side provider call timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
