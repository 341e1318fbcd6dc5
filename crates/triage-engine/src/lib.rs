// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hybrid complaint classification for the Triage engine.
//!
//! This crate provides:
//! - [`ClassificationEngine`]: confidence-gated orchestrator that always returns a result
//! - [`combine`]: field-level merge of rule and generative classifications
//! - [`route`]: the pure routing decision on rule confidence
//!
//! Every request runs the rule classifier first. Generative providers are
//! only called when the rule confidence falls below the high threshold.

pub mod ensemble;
pub mod orchestrator;
pub mod recording;

pub use ensemble::combine;
pub use orchestrator::{route, ClassificationEngine, Route};
