// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end routing scenarios against scripted providers.

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use triage_config::model::EngineConfig;
use triage_core::{
    Category, ClassificationRequest, CompletionProvider, Department, Priority, Sentiment, Source,
};
use triage_engine::ClassificationEngine;
use triage_generative::GenerativeClassifier;
use triage_test_utils::{MockOutcome, MockProvider};
use triage_translate::Translator;

const WATER_REPLY: &str = r#"{
    "category": "Water Supply",
    "subcategory": "Supply Disruption",
    "priority": "high",
    "urgency_score": 8,
    "sentiment": "negative",
    "keywords": ["water", "supply"],
    "suggested_department": "Water Supply Department",
    "estimated_resolution_days": 3,
    "confidence": 0.9
}"#;

const PENSION_REPLY: &str = r#"{
    "category": "Administrative Services",
    "priority": "high",
    "sentiment": "negative",
    "keywords": ["Pension", "delay", "elderly"],
    "suggested_department": "Administrative Office",
    "estimated_resolution_days": 5,
    "confidence": 0.85
}"#;

struct Fixture {
    primary: Arc<MockProvider>,
    secondary: Arc<MockProvider>,
}

impl Fixture {
    fn new(primary: MockProvider, secondary: MockProvider) -> Self {
        Self {
            primary: Arc::new(primary),
            secondary: Arc::new(secondary),
        }
    }

    fn engine(&self, policy: EngineConfig) -> ClassificationEngine {
        let providers: Vec<Arc<dyn CompletionProvider>> = vec![
            Arc::clone(&self.primary) as Arc<dyn CompletionProvider>,
            Arc::clone(&self.secondary) as Arc<dyn CompletionProvider>,
        ];
        ClassificationEngine::new(
            policy,
            GenerativeClassifier::new(providers, Duration::from_millis(500)),
        )
    }

    fn total_calls(&self) -> usize {
        self.primary.call_count() + self.secondary.call_count()
    }
}

fn no_ensemble() -> EngineConfig {
    EngineConfig {
        enable_ensemble: false,
        ..EngineConfig::default()
    }
}

#[tokio::test]
async fn garbage_complaint_is_answered_by_rules_alone() {
    let fx = Fixture::new(
        MockProvider::replying("anthropic", &[WATER_REPLY]),
        MockProvider::replying("openai", &[WATER_REPLY]),
    );
    let engine = fx.engine(EngineConfig::default());

    let result = engine
        .classify(&ClassificationRequest::new(
            "Garbage collection not working",
            "Garbage has piled up near the market and waste is spilling onto the road",
        ))
        .await;

    assert_eq!(result.category, Category::WasteManagement);
    assert!(result.confidence >= 0.9);
    assert_eq!(result.source, Source::Rule);
    assert_eq!(fx.total_calls(), 0);
}

#[tokio::test]
async fn ambiguous_complaint_without_ensemble_goes_generative() {
    let fx = Fixture::new(
        MockProvider::replying("anthropic", &[WATER_REPLY]),
        MockProvider::replying("openai", &[WATER_REPLY]),
    );
    let engine = fx.engine(no_ensemble());

    let result = engine
        .classify(&ClassificationRequest::new(
            "Strange happenings",
            "Something strange keeps happening behind the community hall every evening",
        ))
        .await;

    assert_eq!(result.source, Source::Generative);
    assert_eq!(result.category, Category::WaterSupply);
    assert_eq!(result.priority, Priority::High);
    assert!(result.rule_confidence.is_none());
    assert_eq!(fx.primary.call_count(), 1);
    assert_eq!(fx.secondary.call_count(), 0);
}

#[tokio::test]
async fn vague_complaint_with_failing_providers_gets_default() {
    let fx = Fixture::new(MockProvider::failing("anthropic"), MockProvider::failing("openai"));
    let engine = fx.engine(EngineConfig::default());

    let result = engine.classify(&ClassificationRequest::new("Help", "please")).await;

    assert_eq!(result.source, Source::Default);
    assert_eq!(result.category, Category::Other);
    assert_eq!(result.suggested_department, Department::Administrative);
    assert_eq!(result.estimated_resolution_days, 7);
    assert_eq!(result.priority, Priority::Medium);
    assert_eq!(result.urgency_score, 5);
    assert_eq!(result.sentiment, Sentiment::Neutral);
    assert_eq!(result.confidence, 0.5);
    assert_eq!(fx.primary.call_count(), 1);
    assert_eq!(fx.secondary.call_count(), 1);
}

#[tokio::test]
async fn medium_band_with_ensemble_is_hybrid() {
    let fx = Fixture::new(
        MockProvider::replying("anthropic", &[PENSION_REPLY]),
        MockProvider::failing("openai"),
    );
    let engine = fx.engine(EngineConfig::default());

    let result = engine
        .classify(&ClassificationRequest::new("Certificate", "Pension office unresponsive"))
        .await;

    assert_eq!(result.source, Source::Hybrid);
    assert_eq!(result.category, Category::AdministrativeServices);
    assert_eq!(result.rule_confidence, Some(0.65));
    assert_eq!(result.generative_confidence, Some(0.85));
    assert!((result.confidence - 0.75).abs() < 1e-9);
    assert_eq!(
        result.keywords,
        ["certificate", "pension", "office", "unresponsive", "delay"]
    );
    assert_eq!(result.priority, Priority::High);
    assert_eq!(result.estimated_resolution_days, 5);
}

#[tokio::test]
async fn hybrid_category_always_matches_rule() {
    // The provider disagrees on category; the rule keeps it.
    let fx = Fixture::new(
        MockProvider::replying("anthropic", &[WATER_REPLY]),
        MockProvider::failing("openai"),
    );
    let engine = fx.engine(EngineConfig::default());

    let result = engine
        .classify(&ClassificationRequest::new("Certificate", "Pension office unresponsive"))
        .await;

    assert_eq!(result.source, Source::Hybrid);
    assert_eq!(result.category, Category::AdministrativeServices);
    assert_eq!(result.suggested_department, Department::WaterSupply);
}

#[tokio::test]
async fn medium_band_failure_returns_rule() {
    let fx = Fixture::new(MockProvider::failing("anthropic"), MockProvider::failing("openai"));
    let engine = fx.engine(EngineConfig::default());

    let result = engine
        .classify(&ClassificationRequest::new("Certificate", "Pension office unresponsive"))
        .await;

    assert_eq!(result.source, Source::Rule);
    assert_eq!(result.confidence, 0.65);
    assert_eq!(fx.total_calls(), 2);
}

#[tokio::test]
async fn usable_rule_survives_generative_failure_without_ensemble() {
    let fx = Fixture::new(MockProvider::failing("anthropic"), MockProvider::failing("openai"));
    let engine = fx.engine(no_ensemble());

    let result = engine
        .classify(&ClassificationRequest::new(
            "Strange happenings",
            "Something strange keeps happening behind the community hall every evening",
        ))
        .await;

    assert_eq!(result.source, Source::Rule);
    assert_eq!(result.confidence, 0.7);
}

#[tokio::test]
async fn disabled_generative_makes_no_calls() {
    let fx = Fixture::new(
        MockProvider::replying("anthropic", &[WATER_REPLY]),
        MockProvider::replying("openai", &[WATER_REPLY]),
    );
    let engine = fx.engine(EngineConfig {
        enable_generative_fallback: false,
        ..EngineConfig::default()
    });

    let vague = engine.classify(&ClassificationRequest::new("Help", "please")).await;
    let medium = engine
        .classify(&ClassificationRequest::new("Certificate", "Pension office unresponsive"))
        .await;

    assert_eq!(vague.source, Source::Default);
    assert_eq!(medium.source, Source::Rule);
    assert_eq!(fx.total_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn slow_primary_falls_through_to_secondary() {
    let fx = Fixture::new(
        MockProvider::with_outcomes(
            "anthropic",
            vec![MockOutcome::Delayed(Duration::from_secs(30), WATER_REPLY.into())],
        ),
        MockProvider::replying("openai", &[WATER_REPLY]),
    );
    let engine = fx.engine(EngineConfig::default());

    let result = engine.classify(&ClassificationRequest::new("Help", "please")).await;

    assert_eq!(result.source, Source::Generative);
    assert_eq!(fx.secondary.call_count(), 1);
}

#[tokio::test]
async fn translated_text_feeds_rule_classifier() {
    let fx = Fixture::new(MockProvider::failing("anthropic"), MockProvider::failing("openai"));
    let translator_backend = Arc::new(MockProvider::replying(
        "openai",
        &["Garbage not collected", "Garbage and waste piled up for a week"],
    ));
    let engine = fx.engine(EngineConfig::default()).with_translator(Translator::new(
        Arc::clone(&translator_backend) as Arc<dyn CompletionProvider>,
        Duration::from_millis(500),
    ));

    let result = engine
        .classify(&ClassificationRequest::new("Kachra nahi uthaya", "Ek hafte se kachra pada hai"))
        .await;

    assert_eq!(result.category, Category::WasteManagement);
    assert_eq!(result.source, Source::Rule);
    assert_eq!(translator_backend.call_count(), 2);
    assert_eq!(fx.total_calls(), 0);
}

#[tokio::test]
#[tracing_test::traced_test]
async fn classification_is_logged_with_source() {
    let fx = Fixture::new(MockProvider::failing("anthropic"), MockProvider::failing("openai"));
    let engine = fx.engine(EngineConfig::default());

    engine.classify(&ClassificationRequest::new("Help", "please")).await;

    assert!(logs_contain("complaint classified"));
    assert!(logs_contain("provider failed, trying next"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_result_satisfies_invariants(title in "\\PC{0,60}", description in "\\PC{0,200}") {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let fx = Fixture::new(MockProvider::failing("anthropic"), MockProvider::failing("openai"));
        let engine = fx.engine(EngineConfig::default());

        let result = runtime.block_on(engine.classify(&ClassificationRequest::new(title, description)));

        prop_assert!(result.check_invariants().is_ok(), "{:?}", result.check_invariants());
        prop_assert_ne!(result.source, Source::Generative);
        prop_assert_ne!(result.source, Source::Hybrid);
    }
}
