// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider-chain classification.
//!
//! Providers are tried strictly in order, one call each, every call bounded
//! by the generative timeout. The first reply that validates is returned.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use triage_core::types::CompletionRequest;
use triage_core::{ClassificationRequest, CompletionProvider, TriageError};

use crate::parse::{parse_classification_response, GenerativeClassification};
use crate::prompt::{build_classification_prompt, SYSTEM_PROMPT};

/// Default upper bound on generated tokens for a classification reply.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Classifies complaints by asking generative providers in fallback order.
pub struct GenerativeClassifier {
    providers: Vec<Arc<dyn CompletionProvider>>,
    timeout: Duration,
    max_tokens: u32,
}

impl GenerativeClassifier {
    /// Create a classifier over `providers`, tried in the given order.
    pub fn new(providers: Vec<Arc<dyn CompletionProvider>>, timeout: Duration) -> Self {
        Self {
            providers,
            timeout,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Override the per-reply token limit.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Number of providers in the chain.
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Names of the providers, in call order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Classify a request.
    ///
    /// Returns [`TriageError::ProvidersExhausted`] when no provider produced
    /// a valid classification, including when the chain is empty.
    pub async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> Result<GenerativeClassification, TriageError> {
        let completion = CompletionRequest {
            system_prompt: Some(SYSTEM_PROMPT.to_string()),
            prompt: build_classification_prompt(request),
            max_tokens: self.max_tokens,
            json_output: true,
        };

        for provider in &self.providers {
            let started = Instant::now();
            match self.attempt(provider.as_ref(), completion.clone()).await {
                Ok(classification) => {
                    info!(
                        provider = provider.name(),
                        category = %classification.category,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "generative classification succeeded"
                    );
                    return Ok(classification);
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        kind = e.kind(),
                        error = %e,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "provider failed, trying next"
                    );
                    record_provider_failure(provider.name(), e.kind());
                }
            }
        }

        Err(TriageError::ProvidersExhausted {
            attempted: self.providers.len(),
        })
    }

    async fn attempt(
        &self,
        provider: &dyn CompletionProvider,
        completion: CompletionRequest,
    ) -> Result<GenerativeClassification, TriageError> {
        let response = match tokio::time::timeout(self.timeout, provider.complete(completion)).await
        {
            Ok(result) => result?,
            Err(_elapsed) => {
                return Err(TriageError::Timeout {
                    duration: self.timeout,
                });
            }
        };
        debug!(provider = provider.name(), model = %response.model, "provider replied");
        parse_classification_response(&response.content)
    }
}

fn record_provider_failure(provider: &str, kind: &'static str) {
    metrics::counter!(
        "triage_provider_failures_total",
        "provider" => provider.to_string(),
        "kind" => kind
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::{Category, Priority};
    use triage_test_utils::{MockOutcome, MockProvider};

    const VALID: &str = r#"{"category":"Water Supply","priority":"high","suggested_department":"Water Supply Department","confidence":0.9}"#;

    fn chain(providers: &[&Arc<MockProvider>]) -> GenerativeClassifier {
        let providers = providers
            .iter()
            .map(|p| Arc::clone(p) as Arc<dyn CompletionProvider>)
            .collect();
        GenerativeClassifier::new(providers, Duration::from_millis(200))
    }

    fn request() -> ClassificationRequest {
        ClassificationRequest::new("No water", "Taps dry since Monday")
    }

    #[tokio::test]
    async fn primary_success_skips_secondary() {
        let primary = Arc::new(MockProvider::replying("primary", &[VALID]));
        let secondary = Arc::new(MockProvider::replying("secondary", &[VALID]));
        let classifier = chain(&[&primary, &secondary]);

        let g = classifier.classify(&request()).await.unwrap();
        assert_eq!(g.category, Category::WaterSupply);
        assert_eq!(g.priority, Priority::High);
        assert_eq!(primary.call_count(), 1);
        assert_eq!(secondary.call_count(), 0);
    }

    #[tokio::test]
    async fn falls_through_on_provider_error() {
        let primary = Arc::new(MockProvider::failing("primary"));
        let secondary = Arc::new(MockProvider::replying("secondary", &[VALID]));
        let classifier = chain(&[&primary, &secondary]);

        assert!(classifier.classify(&request()).await.is_ok());
        assert_eq!(primary.call_count(), 1);
        assert_eq!(secondary.call_count(), 1);
    }

    #[tokio::test]
    async fn falls_through_on_invalid_reply() {
        let primary = Arc::new(MockProvider::replying(
            "primary",
            &[r#"{"category":"Potholes","priority":"high","suggested_department":"Public Works Department"}"#],
        ));
        let secondary = Arc::new(MockProvider::replying("secondary", &[VALID]));
        let classifier = chain(&[&primary, &secondary]);

        let g = classifier.classify(&request()).await.unwrap();
        assert_eq!(g.category, Category::WaterSupply);
        assert_eq!(secondary.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn falls_through_on_timeout() {
        let primary = Arc::new(MockProvider::with_outcomes(
            "primary",
            vec![MockOutcome::Delayed(Duration::from_secs(30), VALID.into())],
        ));
        let secondary = Arc::new(MockProvider::replying("secondary", &[VALID]));
        let classifier = chain(&[&primary, &secondary]);

        assert!(classifier.classify(&request()).await.is_ok());
        assert_eq!(primary.call_count(), 1);
        assert_eq!(secondary.call_count(), 1);
    }

    #[tokio::test]
    async fn exhausted_chain_reports_attempts() {
        let primary = Arc::new(MockProvider::failing("primary"));
        let secondary = Arc::new(MockProvider::replying("secondary", &["I cannot help with that."]));
        let classifier = chain(&[&primary, &secondary]);

        let err = classifier.classify(&request()).await.unwrap_err();
        assert!(matches!(err, TriageError::ProvidersExhausted { attempted: 2 }));
    }

    #[tokio::test]
    async fn empty_chain_is_exhausted() {
        let classifier = GenerativeClassifier::new(Vec::new(), Duration::from_secs(1));
        let err = classifier.classify(&request()).await.unwrap_err();
        assert!(matches!(err, TriageError::ProvidersExhausted { attempted: 0 }));
    }

    #[tokio::test]
    async fn request_asks_for_json() {
        let primary = Arc::new(MockProvider::replying("primary", &[VALID]));
        let classifier = chain(&[&primary]).with_max_tokens(256);
        classifier.classify(&request()).await.unwrap();

        let sent = primary.requests().await;
        assert_eq!(sent.len(), 1);
        assert!(sent[0].json_output);
        assert_eq!(sent[0].max_tokens, 256);
        assert!(sent[0].prompt.contains("Taps dry since Monday"));
        assert_eq!(classifier.provider_names(), ["primary"]);
    }
}
