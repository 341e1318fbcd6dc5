// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Anthropic Messages API.
//!
//! One HTTP request per call. Retrying and per-call deadlines are the
//! caller's concern, since the engine already falls through to the next
//! provider on failure.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;
use triage_core::TriageError;

use crate::types::{ApiErrorResponse, MessageRequest, MessageResponse};

/// Endpoint of the Anthropic Messages API.
const API_BASE_URL: &str = "https://api.anthropic.com/v1/messages";

/// Transport-level ceiling. Engine timeouts are normally much shorter.
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for Anthropic API communication.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    default_model: String,
    base_url: String,
}

impl AnthropicClient {
    /// Creates a new Anthropic API client.
    ///
    /// # Arguments
    /// * `api_key` - Anthropic API key for authentication
    /// * `api_version` - API version string (e.g., "2023-06-01")
    /// * `model` - Default model identifier
    pub fn new(api_key: &str, api_version: &str, model: String) -> Result<Self, TriageError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key).map_err(|e| {
                TriageError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_str(api_version).map_err(|e| {
                TriageError::Config(format!("invalid API version header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

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
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Returns the default model identifier.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Overrides the endpoint URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends a request and returns the full response.
    pub async fn complete_message(
        &self,
        request: &MessageRequest,
    ) -> Result<MessageResponse, TriageError> {
        let response = self
            .client
            .post(&self.base_url)
            .json(request)
            .send()
            .await
            .map_err(|e| TriageError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "anthropic response received");

        let body = response.text().await.map_err(|e| TriageError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "Anthropic API error ({}): {}",
                    api_err.error.type_, api_err.error.message
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
