// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Lookup order: `./triage.toml` > `~/.config/triage/triage.toml` > `/etc/triage/triage.toml`,
//! with `TRIAGE_` environment variables overriding every file.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TriageConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/triage/triage.toml";

/// Configuration file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "triage.toml";

/// Path of the per-user configuration file, if a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("triage").join("triage.toml"))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/triage/triage.toml`
/// 3. `~/.config/triage/triage.toml`
/// 4. `./triage.toml`
/// 5. `TRIAGE_*` environment variables
pub fn load_config() -> Result<TriageConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<TriageConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriageConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TriageConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriageConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for hierarchy loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TriageConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Environment provider mapping `TRIAGE_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `TRIAGE_ENGINE_HIGH_THRESHOLD` must become `engine.high_threshold`.
/// The key arrives with its original case, so it is lowercased before matching.
fn env_provider() -> Env {
    Env::prefixed("TRIAGE_").map(|key| {
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = key_str
            .replacen("engine_", "engine.", 1)
            .replacen("providers_", "providers.", 1)
            .replacen("anthropic_", "anthropic.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("translation_", "translation.", 1)
            .replacen("logging_", "logging.", 1);
        mapped.into()
    })
}
