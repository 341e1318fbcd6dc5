// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for generative model integrations (Anthropic, OpenAI, etc.).

use async_trait::async_trait;

use crate::error::TriageError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for a generative model API.
///
/// Implementations issue exactly one request per call. Retrying and
/// timeouts belong to the caller.
#[async_trait]
pub trait CompletionProvider: PluginAdapter {
    /// Sends a completion request and returns the full response text.
    async fn complete(&self, request: CompletionRequest)
    -> Result<CompletionResponse, TriageError>;
}
