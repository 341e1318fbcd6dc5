// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Triage integration tests.
//!
//! Provides a scripted completion provider so the engine's routing and
//! fallback paths can be exercised without external API calls.
//!
//! # Components
//!
//! - [`MockProvider`] - completion provider with a queue of scripted outcomes
//! - [`MockOutcome`] - one scripted reply, failure, or delayed reply

pub mod mock_provider;

pub use mock_provider::{MockOutcome, MockProvider};
