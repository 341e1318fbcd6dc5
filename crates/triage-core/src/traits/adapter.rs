// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all plugin adapters must implement.

use async_trait::async_trait;

use crate::error::TriageError;
use crate::types::HealthStatus;

/// The base trait for all Triage adapters.
///
/// Provides identity and a health check. Adapters are shared across
/// concurrent requests, so they must be `Send + Sync`.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the name used in configuration and logs (e.g. `anthropic`).
    fn name(&self) -> &str;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, TriageError>;
}
