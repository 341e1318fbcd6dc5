// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks the constraints serde cannot express: threshold ordering and
//! range, non-zero timeouts, and provider names that actually exist.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::{TriageConfig, KNOWN_PROVIDERS};

/// Validate a deserialized configuration.
///
/// Collects every violation instead of stopping at the first one.
pub fn validate_config(config: &TriageConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let engine = &config.engine;

    for (name, value) in [
        ("engine.high_threshold", engine.high_threshold),
        ("engine.medium_threshold", engine.medium_threshold),
    ] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ConfigError::Validation {
                message: format!("{name} must be within [0, 1], got {value}"),
            });
        }
    }

    if engine.medium_threshold > engine.high_threshold {
        errors.push(ConfigError::Validation {
            message: format!(
                "engine.medium_threshold ({}) must not exceed engine.high_threshold ({})",
                engine.medium_threshold, engine.high_threshold
            ),
        });
    }

    if engine.generative_timeout_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "engine.generative_timeout_ms must be greater than 0".to_string(),
        });
    }

    if config.translation.timeout_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "translation.timeout_ms must be greater than 0".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for name in &config.providers.order {
        if !KNOWN_PROVIDERS.contains(&name.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "providers.order contains unknown provider `{name}` (known: {})",
                    KNOWN_PROVIDERS.join(", ")
                ),
            });
        } else if !seen.insert(name) {
            errors.push(ConfigError::Validation {
                message: format!("provider `{name}` listed twice in providers.order"),
            });
        }
    }

    if config.translation.enabled && !KNOWN_PROVIDERS.contains(&config.translation.provider.as_str())
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "translation.provider `{}` is not a known provider",
                config.translation.provider
            ),
        });
    }

    if config.openai.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "openai.base_url must not be empty".to_string(),
        });
    }

    for (name, max_tokens) in [
        ("anthropic.max_tokens", config.anthropic.max_tokens),
        ("openai.max_tokens", config.openai.max_tokens),
    ] {
        if max_tokens == 0 {
            errors.push(ConfigError::Validation {
                message: format!("{name} must be greater than 0"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &TriageConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&TriageConfig::default()).is_ok());
    }

    #[test]
    fn partial_section_fills_defaults() {
        let toml_str = r#"
[engine]
medium_threshold = 0.5
"#;
        let config: TriageConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.engine.medium_threshold, 0.5);
        assert_eq!(config.engine.high_threshold, 0.8);
        assert_eq!(config.providers.order, ["anthropic", "openai"]);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn provider_order_from_toml_is_checked() {
        let toml_str = r#"
[providers]
order = ["openai", "openai", "gemini"]
"#;
        let config: TriageConfig = toml::from_str(toml_str).unwrap();
        let msgs = messages(&config);
        assert!(msgs.iter().any(|m| m.contains("listed twice")));
        assert!(msgs.iter().any(|m| m.contains("unknown provider `gemini`")));
    }

    #[test]
    fn medium_above_high_fails() {
        let mut config = TriageConfig::default();
        config.engine.medium_threshold = 0.9;
        config.engine.high_threshold = 0.7;
        let msgs = messages(&config);
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].contains("must not exceed"));
    }

    #[test]
    fn threshold_out_of_range_fails() {
        let mut config = TriageConfig::default();
        config.engine.high_threshold = 1.5;
        let msgs = messages(&config);
        assert!(msgs.iter().any(|m| m.contains("engine.high_threshold must be within")));
    }

    #[test]
    fn equal_thresholds_are_allowed() {
        let mut config = TriageConfig::default();
        config.engine.medium_threshold = 0.8;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_timeouts_fail() {
        let mut config = TriageConfig::default();
        config.engine.generative_timeout_ms = 0;
        config.translation.timeout_ms = 0;
        assert_eq!(messages(&config).len(), 2);
    }

    #[test]
    fn unknown_and_duplicate_providers_fail() {
        let mut config = TriageConfig::default();
        config.providers.order = vec![
            "openai".to_string(),
            "gemini".to_string(),
            "openai".to_string(),
        ];
        let msgs = messages(&config);
        assert!(msgs.iter().any(|m| m.contains("unknown provider `gemini`")));
        assert!(msgs.iter().any(|m| m.contains("listed twice")));
    }

    #[test]
    fn empty_provider_order_is_valid() {
        let mut config = TriageConfig::default();
        config.providers.order.clear();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn unknown_translation_provider_only_checked_when_enabled() {
        let mut config = TriageConfig::default();
        config.translation.provider = "deepl".to_string();
        assert!(validate_config(&config).is_ok());
        config.translation.enabled = true;
        assert!(messages(&config)[0].contains("translation.provider"));
    }
}
