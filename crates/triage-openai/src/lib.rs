// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible completion provider for the Triage engine.
//!
//! Talks to the Chat Completions API, or any server that mimics it, and
//! uses JSON mode when the caller asks for structured output.

pub mod client;
pub mod types;

use async_trait::async_trait;
use tracing::{debug, info};
use triage_config::model::OpenAiConfig;
use triage_core::types::{CompletionRequest, CompletionResponse, HealthStatus};
use triage_core::{CompletionProvider, PluginAdapter, TriageError};

use crate::client::OpenAiClient;
use crate::types::{ChatMessage, ChatRequest, ResponseFormat};

/// OpenAI provider implementing [`CompletionProvider`].
///
/// API key resolution order: config -> `OPENAI_API_KEY` env var -> error.
pub struct OpenAiProvider {
    client: OpenAiClient,
    max_tokens: u32,
}

impl OpenAiProvider {
    /// Creates a new provider from its config section.
    pub fn new(config: &OpenAiConfig) -> Result<Self, TriageError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let client = OpenAiClient::new(&api_key, &config.base_url, config.model.clone())?;

        info!(model = config.model, base_url = config.base_url, "OpenAI provider initialized");

        Ok(Self {
            client,
            max_tokens: config.max_tokens,
        })
    }

    fn to_chat_request(&self, request: &CompletionRequest) -> ChatRequest {
        let messages = request
            .system_prompt
            .iter()
            .map(ChatMessage::system)
            .chain(std::iter::once(ChatMessage::user(request.prompt.clone())))
            .collect();
        ChatRequest {
            model: self.client.default_model().to_string(),
            messages,
            max_tokens: request.max_tokens.min(self.max_tokens),
            response_format: request.json_output.then(ResponseFormat::json_object),
        }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn health_check(&self) -> Result<HealthStatus, TriageError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, TriageError> {
        let chat_request = self.to_chat_request(&request);
        let response = self.client.chat(&chat_request).await?;
        debug!(
            id = response.id,
            finish_reason = ?response.choices.first().and_then(|c| c.finish_reason.as_deref()),
            "chat completion finished"
        );

        let content = response
            .first_content()
            .ok_or_else(|| TriageError::Provider {
                message: "chat completion returned no content".to_string(),
                source: None,
            })?
            .to_string();

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

    std::env::var("OPENAI_API_KEY")
        .ok()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            TriageError::Config(
                "OpenAI API key not found. Set openai.api_key in config or OPENAI_API_KEY environment variable.".into(),
            )
        })
}
