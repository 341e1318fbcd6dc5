// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort translation of complaint text to English.
//!
//! Translation never fails from the caller's point of view: a disabled
//! translator, a blank input, a provider error, an empty reply, or a
//! timeout all return the input unchanged.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use triage_core::types::CompletionRequest;
use triage_core::{ClassificationRequest, CompletionProvider, TriageError};

const TRANSLATION_SYSTEM_PROMPT: &str = "You translate citizen complaints into plain English. \
Reply with the translation only. If the text is already English, reply with it unchanged.";

const TRANSLATION_MAX_TOKENS: u32 = 1024;

/// Translates request text through an optional completion provider.
pub struct Translator {
    provider: Option<Arc<dyn CompletionProvider>>,
    timeout: Duration,
}

impl Translator {
    /// A translator backed by `provider`, each call bounded by `timeout`.
    pub fn new(provider: Arc<dyn CompletionProvider>, timeout: Duration) -> Self {
        Self {
            provider: Some(provider),
            timeout,
        }
    }

    /// A translator that always passes text through.
    pub fn disabled() -> Self {
        Self {
            provider: None,
            timeout: Duration::ZERO,
        }
    }

    /// Whether a provider is attached.
    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Translate `text`, returning it unchanged on any failure.
    pub async fn translate(&self, text: &str) -> String {
        let Some(provider) = &self.provider else {
            return text.to_string();
        };
        if text.trim().is_empty() {
            return text.to_string();
        }

        match self.try_translate(provider.as_ref(), text).await {
            Ok(translated) => {
                debug!(provider = provider.name(), "text translated");
                translated
            }
            Err(e) => {
                warn!(
                    provider = provider.name(),
                    kind = e.kind(),
                    error = %e,
                    "translation failed, using original text"
                );
                text.to_string()
            }
        }
    }

    /// Translate title and description concurrently.
    ///
    /// The whole step is bounded by a single translation timeout because
    /// both calls run at the same time.
    pub async fn translate_request(&self, request: &ClassificationRequest) -> ClassificationRequest {
        if !self.is_enabled() {
            return request.clone();
        }
        let (title, description) = tokio::join!(
            self.translate(&request.title),
            self.translate(&request.description)
        );
        ClassificationRequest {
            title,
            description,
            location: request.location.clone(),
        }
    }

    async fn try_translate(
        &self,
        provider: &dyn CompletionProvider,
        text: &str,
    ) -> Result<String, TriageError> {
        let request = CompletionRequest {
            system_prompt: Some(TRANSLATION_SYSTEM_PROMPT.to_string()),
            prompt: text.to_string(),
            max_tokens: TRANSLATION_MAX_TOKENS,
            json_output: false,
        };
        let response = tokio::time::timeout(self.timeout, provider.complete(request))
            .await
            .map_err(|_| TriageError::Timeout {
                duration: self.timeout,
            })??;

        let translated = response.content.trim();
        if translated.is_empty() {
            return Err(TriageError::Parse {
                message: "empty translation".to_string(),
            });
        }
        Ok(translated.to_string())
    }
}
