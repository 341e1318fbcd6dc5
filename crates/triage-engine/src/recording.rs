// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics-rs facade so any installed recorder can collect these.
//! Nothing is recorded anywhere until a recorder is installed.

use metrics::{describe_counter, describe_histogram};
use triage_core::Source;

/// Register all Triage metric descriptions.
///
/// Call once at startup after a recorder is installed.
pub fn register_metrics() {
    describe_counter!(
        "triage_classifications_total",
        "Classifications returned, by source"
    );
    describe_counter!(
        "triage_provider_failures_total",
        "Generative provider calls that failed, by provider and failure kind"
    );
    describe_histogram!(
        "triage_classification_latency_seconds",
        "Wall-clock time from request receipt to result"
    );
}

/// Record a returned classification.
pub fn record_classification(source: Source) {
    metrics::counter!("triage_classifications_total", "source" => source.to_string()).increment(1);
}

/// Record end-to-end classification latency.
pub fn record_latency(seconds: f64) {
    metrics::histogram!("triage_classification_latency_seconds").record(seconds);
}
