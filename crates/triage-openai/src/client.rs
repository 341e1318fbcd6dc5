// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for OpenAI-compatible Chat Completions endpoints.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;
use triage_core::TriageError;

use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

/// Transport-level ceiling. Engine timeouts are normally much shorter.
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for a Chat Completions API.
///
/// Works against any server exposing `POST {base_url}/chat/completions`.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    default_model: String,
    endpoint: String,
}

impl OpenAiClient {
    /// Creates a client for `base_url` (without the `/chat/completions` suffix).
    pub fn new(api_key: &str, base_url: &str, model: String) -> Result<Self, TriageError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                TriageError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| TriageError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            default_model: model,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }

    /// Returns the default model identifier.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Sends a request and returns the full response. No retries.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, TriageError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| TriageError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "chat completion response received");

        let body = response.text().await.map_err(|e| TriageError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "OpenAI API error ({}): {}",
                    api_err.error.type_.as_deref().unwrap_or("unknown"),
                    api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(TriageError::Provider {
                message,
                source: None,
            });
        }

        serde_json::from_str(&body).map_err(|e| TriageError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
