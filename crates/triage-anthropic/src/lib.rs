// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Claude completion provider for the Triage engine.
//!
//! Implements [`CompletionProvider`] over the non-streaming Messages API.

pub mod client;
pub mod types;

use async_trait::async_trait;
use tracing::{debug, info};
use triage_config::model::AnthropicConfig;
use triage_core::types::{CompletionRequest, CompletionResponse, HealthStatus};
use triage_core::{CompletionProvider, PluginAdapter, TriageError};

use crate::client::AnthropicClient;
use crate::types::{ApiMessage, MessageRequest};

/// Assistant prefill that forces the reply to continue a JSON object.
const JSON_PREFILL: &str = "{";

/// Anthropic provider implementing [`CompletionProvider`].
///
/// API key resolution order: config -> `ANTHROPIC_API_KEY` env var -> error.
pub struct AnthropicProvider {
    client: AnthropicClient,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Creates a new Anthropic provider from its config section.
    pub fn new(config: &AnthropicConfig) -> Result<Self, TriageError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let client = AnthropicClient::new(&api_key, &config.api_version, config.model.clone())?;

        info!(model = config.model, "Anthropic provider initialized");

        Ok(Self {
            client,
            max_tokens: config.max_tokens,
        })
    }

    /// Creates a provider with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: AnthropicClient) -> Self {
        Self {
            client,
            max_tokens: 1024,
        }
    }

    /// Converts a [`CompletionRequest`] to an Anthropic [`MessageRequest`].
    ///
    /// JSON requests get an assistant prefill of `{` so the model continues
    /// an object instead of opening with prose.
    fn to_message_request(&self, request: &CompletionRequest) -> MessageRequest {
        let mut messages = vec![ApiMessage::user(request.prompt.clone())];
        if request.json_output {
            messages.push(ApiMessage::assistant(JSON_PREFILL));
        }
        MessageRequest {
            model: self.client.default_model().to_string(),
            messages,
            system: request.system_prompt.clone(),
            max_tokens: request.max_tokens.min(self.max_tokens),
        }
    }
}

#[async_trait]
impl PluginAdapter for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn health_check(&self) -> Result<HealthStatus, TriageError> {
        // Avoid spending tokens; a constructed client is considered healthy.
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl CompletionProvider for AnthropicProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, TriageError> {
        let api_request = self.to_message_request(&request);
        let response = self.client.complete_message(&api_request).await?;
        debug!(
            id = response.id,
            stop_reason = ?response.stop_reason,
            output_tokens = response.usage.output_tokens,
            "anthropic completion finished"
        );

        let mut content = response.text();
        if request.json_output && !content.trim_start().starts_with('{') {
            content.insert_str(0, JSON_PREFILL);
        }

        Ok(CompletionResponse {
            id: response.id,
            content,
            model: response.model,
        })
    }
}

/// Resolves the API key from config or environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, TriageError> {
    if let Some(key) = config_key.as_ref().filter(|k| !k.is_empty()) {
        return Ok(key.clone());
    }

    std::env::var("ANTHROPIC_API_KEY")
        .ok()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            TriageError::Config(
                "Anthropic API key not found. Set anthropic.api_key in config or ANTHROPIC_API_KEY environment variable.".into(),
            )
        })
}
