// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Confidence-gated classification orchestrator.
//!
//! Order of work: translate (optional) > rule classify > route on rule
//! confidence > generative (optional) > combine (optional).

use std::time::Instant;

use tracing::{debug, info, warn};
use triage_config::model::EngineConfig;
use triage_core::{ClassificationRequest, ClassificationResult, TriageError};
use triage_generative::{GenerativeClassification, GenerativeClassifier};
use triage_rules::RuleClassifier;
use triage_translate::Translator;

use crate::ensemble::combine;
use crate::recording;

/// Path chosen for a request after rule classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Rule confidence is high enough to return as is.
    ReturnRule,
    /// Medium band with ensemble enabled: ask generative and combine.
    Ensemble,
    /// Low band, or medium band with ensemble disabled: generative alone.
    GenerativeOnly,
}

/// Decide the path for a rule result with the given confidence.
pub fn route(policy: &EngineConfig, rule_confidence: f64) -> Route {
    if rule_confidence >= policy.high_threshold {
        Route::ReturnRule
    } else if rule_confidence >= policy.medium_threshold && policy.enable_ensemble {
        Route::Ensemble
    } else {
        Route::GenerativeOnly
    }
}

/// Hybrid complaint classifier.
///
/// Holds only immutable configuration and shared provider handles, so one
/// engine can serve concurrent requests behind an `Arc`.
pub struct ClassificationEngine {
    policy: EngineConfig,
    rules: RuleClassifier,
    generative: GenerativeClassifier,
    translator: Translator,
}

impl ClassificationEngine {
    /// Create an engine with translation disabled.
    pub fn new(policy: EngineConfig, generative: GenerativeClassifier) -> Self {
        Self {
            policy,
            rules: RuleClassifier::new(),
            generative,
            translator: Translator::disabled(),
        }
    }

    /// Attach a translator for the pre-classification step.
    pub fn with_translator(mut self, translator: Translator) -> Self {
        self.translator = translator;
        self
    }

    /// The policy this engine routes with.
    pub fn policy(&self) -> &EngineConfig {
        &self.policy
    }

    /// Generative providers in fallback order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.generative.provider_names()
    }

    /// Whether requests are translated before classification.
    pub fn translation_enabled(&self) -> bool {
        self.translator.is_enabled()
    }

    /// Classify a complaint. Always returns a fully populated result.
    pub async fn classify(&self, request: &ClassificationRequest) -> ClassificationResult {
        let received = Instant::now();

        let request = self.translator.translate_request(request).await;
        let rule = self.rules.classify_request(&request);
        let route = route(&self.policy, rule.confidence);
        debug!(
            category = %rule.category,
            confidence = rule.confidence,
            ?route,
            "rule classification done"
        );

        let mut result = match route {
            Route::ReturnRule => rule,
            Route::Ensemble => match self.generative(&request).await {
                Ok(generative) => combine(&rule, &generative),
                Err(_) => rule,
            },
            Route::GenerativeOnly => match self.generative(&request).await {
                Ok(generative) => generative.to_result(),
                Err(_) if rule.confidence >= self.policy.medium_threshold => rule,
                Err(_) => ClassificationResult::default_classification(),
            },
        };

        let elapsed = received.elapsed();
        result.processing_time_ms = elapsed.as_millis() as u64;
        debug_assert!(result.check_invariants().is_ok(), "{:?}", result.check_invariants());

        info!(
            source = %result.source,
            category = %result.category,
            confidence = result.confidence,
            elapsed_ms = result.processing_time_ms,
            "complaint classified"
        );
        recording::record_classification(result.source);
        recording::record_latency(elapsed.as_secs_f64());
        result
    }

    async fn generative(
        &self,
        request: &ClassificationRequest,
    ) -> Result<GenerativeClassification, TriageError> {
        if !self.policy.enable_generative_fallback {
            return Err(TriageError::Config(
                "generative classification disabled".to_string(),
            ));
        }
        self.generative.classify(request).await.inspect_err(|e| {
            warn!(error = %e, "generative classification unavailable");
        })
    }
}
