// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Triage classification engine.

use thiserror::Error;

/// The primary error type used across all Triage adapter traits and core operations.
#[derive(Debug, Error)]
pub enum TriageError {
    /// Configuration errors (invalid thresholds, missing credentials, bad header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Model provider errors (network failure, non-success HTTP status).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Provider output that is malformed or does not satisfy the classification schema.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Every configured provider in the fallback chain failed.
    #[error("all {attempted} classification providers failed")]
    ProvidersExhausted { attempted: usize },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TriageError {
    /// Short label used as a metric/log dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            TriageError::Config(_) => "config",
            TriageError::Provider { .. } => "provider",
            TriageError::Parse { .. } => "parse",
            TriageError::ProvidersExhausted { .. } => "exhausted",
            TriageError::Timeout { .. } => "timeout",
            TriageError::Internal(_) => "internal",
        }
    }
}
