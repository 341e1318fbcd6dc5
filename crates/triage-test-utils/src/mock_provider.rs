// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockProvider` implements `CompletionProvider` with a FIFO queue of
//! scripted outcomes and records every request it receives.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use triage_core::types::{CompletionRequest, CompletionResponse, HealthStatus};
use triage_core::{CompletionProvider, PluginAdapter, TriageError};

/// What the mock does on one call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Return this text as the completion.
    Reply(String),
    /// Fail with a provider error carrying this message.
    Fail(String),
    /// Sleep, then return the text. Used to trip caller timeouts.
    Delayed(Duration, String),
}

/// A completion provider that plays back scripted outcomes.
///
/// When the queue is empty every call fails, so a test that forgets to
/// script a provider sees it as unavailable rather than silently succeeding.
pub struct MockProvider {
    name: String,
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    calls: AtomicUsize,
}

impl MockProvider {
    /// Create a mock with an empty outcome queue.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock pre-loaded with outcomes.
    pub fn with_outcomes(name: impl Into<String>, outcomes: Vec<MockOutcome>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::from(outcomes))),
            ..Self::new(name)
        }
    }

    /// Shorthand for a mock that replies with each text in turn.
    pub fn replying(name: impl Into<String>, replies: &[&str]) -> Self {
        Self::with_outcomes(
            name,
            replies.iter().map(|r| MockOutcome::Reply((*r).to_string())).collect(),
        )
    }

    /// Shorthand for a mock that always fails.
    pub fn failing(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    /// Append an outcome to the queue.
    pub async fn push(&self, outcome: MockOutcome) {
        self.outcomes.lock().await.push_back(outcome);
    }

    /// Number of `complete` calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every request received, in call order.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn health_check(&self) -> Result<HealthStatus, TriageError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, TriageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().await.push(request);
        let outcome = self.outcomes.lock().await.pop_front();

        let content = match outcome {
            Some(MockOutcome::Reply(text)) => text,
            Some(MockOutcome::Delayed(delay, text)) => {
                tokio::time::sleep(delay).await;
                text
            }
            Some(MockOutcome::Fail(message)) => {
                return Err(TriageError::Provider {
                    message,
                    source: None,
                });
            }
            None => {
                return Err(TriageError::Provider {
                    message: format!("{}: no scripted outcome", self.name),
                    source: None,
                });
            }
        };

        Ok(CompletionResponse {
            id: format!("mock-resp-{}", uuid::Uuid::new_v4()),
            content,
            model: format!("{}-model", self.name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(prompt: &str) -> CompletionRequest {
        CompletionRequest {
            system_prompt: None,
            prompt: prompt.to_string(),
            max_tokens: 100,
            json_output: false,
        }
    }

    #[tokio::test]
    async fn empty_queue_fails() {
        let provider = MockProvider::new("mock");
        let err = provider.complete(req("hi")).await.unwrap_err();
        assert!(matches!(err, TriageError::Provider { .. }));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn outcomes_play_in_order() {
        let provider = MockProvider::with_outcomes(
            "mock",
            vec![
                MockOutcome::Reply("first".into()),
                MockOutcome::Fail("boom".into()),
                MockOutcome::Reply("third".into()),
            ],
        );
        assert_eq!(provider.complete(req("a")).await.unwrap().content, "first");
        assert!(provider.complete(req("b")).await.is_err());
        assert_eq!(provider.complete(req("c")).await.unwrap().content, "third");
        assert_eq!(provider.call_count(), 3);

        let prompts: Vec<_> = provider.requests().await.into_iter().map(|r| r.prompt).collect();
        assert_eq!(prompts, ["a", "b", "c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_outcome_waits() {
        let provider = MockProvider::with_outcomes(
            "slow",
            vec![MockOutcome::Delayed(Duration::from_secs(10), "late".into())],
        );
        let started = tokio::time::Instant::now();
        let resp = provider.complete(req("x")).await.unwrap();
        assert_eq!(resp.content, "late");
        assert!(started.elapsed() >= Duration::from_secs(10));
    }

    #[tokio::test]
    async fn push_after_construction() {
        let provider = MockProvider::failing("mock");
        provider.push(MockOutcome::Reply("dynamic".into())).await;
        assert_eq!(provider.complete(req("x")).await.unwrap().content, "dynamic");
        assert_eq!(provider.name(), "mock");
    }
}
