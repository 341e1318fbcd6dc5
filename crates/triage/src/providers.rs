// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Engine construction from validated configuration.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use triage_config::TriageConfig;
use triage_core::{CompletionProvider, HealthStatus, PluginAdapter, TriageError};
use triage_engine::ClassificationEngine;
use triage_generative::GenerativeClassifier;
use triage_translate::Translator;

/// Construct the named provider from its config section.
pub fn build_provider(
    name: &str,
    config: &TriageConfig,
) -> Result<Arc<dyn CompletionProvider>, TriageError> {
    match name {
        #[cfg(feature = "anthropic")]
        "anthropic" => Ok(Arc::new(triage_anthropic::AnthropicProvider::new(
            &config.anthropic,
        )?)),
        #[cfg(feature = "openai")]
        "openai" => Ok(Arc::new(triage_openai::OpenAiProvider::new(&config.openai)?)),
        other => {
            let _ = config;
            Err(TriageError::Config(format!(
                "provider '{other}' is not available in this build"
            )))
        }
    }
}

/// Health of every provider in the configured chain, in order.
///
/// A provider that cannot be constructed is reported unhealthy with the
/// construction error as the reason.
pub async fn provider_health(config: &TriageConfig) -> Vec<(String, HealthStatus)> {
    let mut report = Vec::with_capacity(config.providers.order.len());
    for name in &config.providers.order {
        let status = match build_provider(name, config) {
            Ok(provider) => provider
                .health_check()
                .await
                .unwrap_or_else(|e| HealthStatus::Unhealthy(e.to_string())),
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        };
        report.push((name.clone(), status));
    }
    report
}

/// Build the engine. Providers that cannot be constructed (usually a
/// missing API key) are skipped with a warning rather than failing startup.
pub fn build_engine(config: &TriageConfig) -> ClassificationEngine {
    let providers: Vec<Arc<dyn CompletionProvider>> = config
        .providers
        .order
        .iter()
        .filter_map(|name| match build_provider(name, config) {
            Ok(provider) => Some(provider),
            Err(e) => {
                warn!(provider = name.as_str(), error = %e, "provider unavailable, skipping");
                None
            }
        })
        .collect();

    if providers.is_empty() && config.engine.enable_generative_fallback {
        warn!("no generative providers available; low-confidence complaints get the default classification");
    }

    let generative = GenerativeClassifier::new(
        providers,
        Duration::from_millis(config.engine.generative_timeout_ms),
    );
    let mut engine = ClassificationEngine::new(config.engine.clone(), generative);

    if config.translation.enabled {
        match build_provider(&config.translation.provider, config) {
            Ok(provider) => {
                engine = engine.with_translator(Translator::new(
                    provider,
                    Duration::from_millis(config.translation.timeout_ms),
                ));
            }
            Err(e) => {
                warn!(
                    provider = config.translation.provider.as_str(),
                    error = %e,
                    "translation provider unavailable; translation disabled"
                );
            }
        }
    }

    info!(
        providers = ?engine.provider_names(),
        translation = engine.translation_enabled(),
        "classification engine ready"
    );
    engine
}
