// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Triage engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Provider names the engine knows how to construct.
pub const KNOWN_PROVIDERS: &[&str] = &["anthropic", "openai"];

/// Top-level Triage configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TriageConfig {
    /// Confidence gates, feature flags, and the generative timeout.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Order of the generative provider fallback chain.
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Anthropic API settings.
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// OpenAI-compatible API settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Translation pre-step settings.
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Orchestrator policy.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Rule confidence at or above which the rule result is returned directly.
    #[serde(default = "default_high_threshold")]
    pub high_threshold: f64,

    /// Lower edge of the band in which rule and generative results are combined.
    #[serde(default = "default_medium_threshold")]
    pub medium_threshold: f64,

    /// Combine rule and generative output in the medium band.
    #[serde(default = "default_true")]
    pub enable_ensemble: bool,

    /// Allow calls to generative providers at all.
    #[serde(default = "default_true")]
    pub enable_generative_fallback: bool,

    /// Per-provider-call timeout in milliseconds.
    #[serde(default = "default_generative_timeout_ms")]
    pub generative_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            high_threshold: default_high_threshold(),
            medium_threshold: default_medium_threshold(),
            enable_ensemble: true,
            enable_generative_fallback: true,
            generative_timeout_ms: default_generative_timeout_ms(),
        }
    }
}

fn default_high_threshold() -> f64 {
    0.8
}

fn default_medium_threshold() -> f64 {
    0.6
}

fn default_true() -> bool {
    true
}

fn default_generative_timeout_ms() -> u64 {
    5000
}

/// Generative provider chain.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    /// Provider names tried in order; the first is primary.
    #[serde(default = "default_provider_order")]
    pub order: Vec<String>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            order: default_provider_order(),
        }
    }
}

fn default_provider_order() -> Vec<String> {
    vec!["anthropic".to_string(), "openai".to_string()]
}

/// Anthropic API configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnthropicConfig {
    /// Anthropic API key. `None` falls back to `ANTHROPIC_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for classification and translation.
    #[serde(default = "default_anthropic_model")]
    pub model: String,

    /// Anthropic API version string.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Maximum tokens to generate per response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_anthropic_model(),
            api_version: default_api_version(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_anthropic_model() -> String {
    "claude-haiku-4-5-20250901".to_string()
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

/// OpenAI-compatible Chat Completions configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. `None` falls back to `OPENAI_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for classification and translation.
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// Base URL of the API, without the `/chat/completions` suffix.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Maximum tokens to generate per response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_openai_model(),
            base_url: default_openai_base_url(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

/// Translation pre-step configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TranslationConfig {
    /// Translate title and description to English before classifying.
    #[serde(default)]
    pub enabled: bool,

    /// Which configured provider performs translation.
    #[serde(default = "default_translation_provider")]
    pub provider: String,

    /// Per-call translation timeout in milliseconds.
    #[serde(default = "default_translation_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: default_translation_provider(),
            timeout_ms: default_translation_timeout_ms(),
        }
    }
}

fn default_translation_provider() -> String {
    "openai".to_string()
}

fn default_translation_timeout_ms() -> u64 {
    2000
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
