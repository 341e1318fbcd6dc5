// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generative-model classification for the Triage engine.
//!
//! Builds a taxonomy-constrained prompt, sends it to each configured
//! completion provider in order, and strictly validates the JSON reply.
//! The first provider whose reply validates wins.

pub mod classifier;
pub mod parse;
pub mod prompt;

pub use classifier::GenerativeClassifier;
pub use parse::{parse_classification_response, GenerativeClassification};
pub use prompt::build_classification_prompt;
