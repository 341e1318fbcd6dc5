// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field-level merge of rule and generative classifications.

use std::collections::HashSet;

use triage_core::{ClassificationResult, Source, MAX_KEYWORDS};
use triage_generative::GenerativeClassification;

/// Merge a rule result with a validated generative classification.
///
/// Category and subcategory stay with the rule. The remaining labels come
/// from the generative reply when it supplied them. Confidence is the plain
/// mean of the two sub-confidences.
pub fn combine(rule: &ClassificationResult, generative: &GenerativeClassification) -> ClassificationResult {
    let rule_confidence = rule.confidence;
    let generative_confidence = generative.effective_confidence();

    ClassificationResult {
        category: rule.category,
        subcategory: rule.subcategory.clone(),
        priority: generative.priority,
        urgency_score: generative.urgency_score.unwrap_or(rule.urgency_score),
        sentiment: generative.sentiment.unwrap_or(rule.sentiment),
        keywords: merge_keywords(&rule.keywords, &generative.keywords),
        suggested_department: generative.suggested_department,
        estimated_resolution_days: generative
            .estimated_resolution_days
            .unwrap_or(rule.estimated_resolution_days),
        confidence: (rule_confidence + generative_confidence) / 2.0,
        source: Source::Hybrid,
        rule_confidence: Some(rule_confidence),
        generative_confidence: Some(generative_confidence),
        processing_time_ms: 0,
    }
}

/// Ordered union, rule keywords first, case-insensitive de-duplication.
fn merge_keywords(rule: &[String], generative: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    rule.iter()
        .chain(generative)
        .filter(|k| seen.insert(k.to_lowercase()))
        .take(MAX_KEYWORDS)
        .cloned()
        .collect()
}
