// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Gemini provider adapter.
//!
//! Builds the meaning-inversion directive, calls the Gemini
//! `generateContent` endpoint, and normalizes its outcomes into
//! [`ProviderError`] variants. The missing-credential case is detected
//! once at construction rather than per call.
//!
//! The adapter sets no deadline of its own; the orchestrator bounds the
//! call with `tokio::time::timeout`, and dropping the future cancels
//! the underlying request.

use crate::config::ProviderConfig;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Provider error types.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("GEMINI_API_KEY environment variable is not set")]
    MissingApiKey,

    #[error("provider rejected credentials (HTTP {0})")]
    AuthRejected(StatusCode),

    #[error("provider returned HTTP {0}")]
    Api(StatusCode),

    #[error("network error calling provider: {0}")]
    Network(#[from] reqwest::Error),

    #[error("provider returned empty response")]
    EmptyResponse,
}

impl ProviderError {
    /// Whether this failure is a per-process configuration problem
    /// rather than a transient call failure.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::MissingApiKey | Self::AuthRejected(_))
    }
}

/// Seam between the orchestrator and the external text-generation
/// provider. Implemented by [`GeminiClient`] in production and by test
/// doubles in the suites.
#[async_trait]
pub trait QuoteExtender: Send + Sync {
    /// Extend `quote` with a continuation that inverts its meaning.
    /// Returns the trimmed combined text.
    async fn extend(&self, quote: &str) -> Result<String, ProviderError>;
}

/// Client for the Gemini `generateContent` API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    config: ProviderConfig,
}

impl GeminiClient {
    /// Create a client, reading the credential from `GEMINI_API_KEY`.
    pub fn from_env(config: ProviderConfig) -> Result<Self, ProviderError> {
        let api_key =
            std::env::var("GEMINI_API_KEY").map_err(|_| ProviderError::MissingApiKey)?;
        Ok(Self::new(api_key, config))
    }

    /// Create a client with an explicit credential.
    pub fn new(api_key: impl Into<String>, config: ProviderConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            config,
        }
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            self.api_key
        )
    }

    fn build_prompt(quote: &str) -> String {
        format!(
            "Take the following quote and extend it without changing the original \
             wording. The extension must invert or subvert the original meaning \
             while keeping the same tone.\n\n\
             Quote: '{quote}'\n\n\
             Return only the complete extended quote (original + extension) without \
             any additional explanation or formatting."
        )
    }
}

#[async_trait]
impl QuoteExtender for GeminiClient {
    async fn extend(&self, quote: &str) -> Result<String, ProviderError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::build_prompt(quote),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
            },
        };

        debug!(model = %self.config.model, "calling generateContent");

        let response = self
            .http
            .post(self.request_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ProviderError::AuthRejected(status));
        }
        if !status.is_success() {
            return Err(ProviderError::Api(status));
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap_or_default();

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(trimmed.to_string())
    }
}

// Gemini API wire types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
