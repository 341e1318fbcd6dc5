// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic fast-path classification for citizen complaints.
//!
//! - [`RuleClassifier`]: keyword-table classifier (no I/O, no latency)
//! - [`NormalizedText`]: whole-word term matching and keyword extraction
//!
//! The orchestrator runs this classifier on every request and only reaches
//! for a generative provider when the rule confidence is too low.

pub mod classifier;
pub mod tables;
pub mod text;

pub use classifier::RuleClassifier;
pub use text::NormalizedText;
