// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Quote payload validator.
//!
//! Structural and semantic checks on the inbound request body:
//! - `quote` field presence and type
//! - non-empty after trimming
//! - length cap in Unicode characters (not bytes)
//!
//! Pure and synchronous; performs no I/O.

use crate::config::ValidationConfig;
use thiserror::Error;
use tracing::debug;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Quote is required and must be a string")]
    MissingQuote,

    #[error("Quote cannot be empty")]
    Empty,

    #[error("Quote must not exceed {max} characters")]
    TooLong { max: usize, actual: usize },
}

/// Quote payload validator.
pub struct QuoteValidator {
    config: ValidationConfig,
}

impl QuoteValidator {
    /// Create a new validator with the given configuration.
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a parsed request body and return the trimmed quote.
    pub fn validate(&self, raw: &serde_json::Value) -> Result<String, ValidationError> {
        let quote = raw
            .get("quote")
            .and_then(|v| v.as_str())
            .ok_or(ValidationError::MissingQuote)?;

        let trimmed = quote.trim();
        if trimmed.is_empty() {
            debug!("quote empty after trim");
            return Err(ValidationError::Empty);
        }

        let length = trimmed.chars().count();
        if length > self.config.max_quote_chars {
            debug!(length, max = self.config.max_quote_chars, "quote too long");
            return Err(ValidationError::TooLong {
                max: self.config.max_quote_chars,
                actual: length,
            });
        }

        Ok(trimmed.to_string())
    }
}
