// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic keyword classification.
//!
//! Classifies complaint text with static tables only. No network, no
//! allocation beyond the result, and the same text always yields the
//! same result.

use tracing::debug;
use triage_core::types::URGENCY_RANGE;
use triage_core::{
    Category, ClassificationRequest, ClassificationResult, Department, Priority, Sentiment, Source,
};

use crate::tables::{
    CategoryRule, CATEGORY_RULES, DEPARTMENT_RULES, HIGH_TERMS, INSUFFICIENT_DETAIL_CONFIDENCE,
    LOW_TERMS, NEGATIVE_TERMS, NO_MATCH_CONFIDENCE, POSITIVE_TERMS, URGENT_TERMS,
};
use crate::text::NormalizedText;

/// Keyword-table complaint classifier.
#[derive(Debug, Clone)]
pub struct RuleClassifier {
    rules: &'static [CategoryRule],
    /// Unmatched text with fewer content words than this is "insufficient detail".
    min_content_words: usize,
}

impl RuleClassifier {
    /// Create a classifier over the built-in tables.
    pub fn new() -> Self {
        Self {
            rules: CATEGORY_RULES,
            min_content_words: 3,
        }
    }

    /// Classify a request's title and description together.
    pub fn classify_request(&self, request: &ClassificationRequest) -> ClassificationResult {
        self.classify(&request.combined_text())
    }

    /// Classify free text.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let normalized = NormalizedText::new(text);

        let (category, subcategory, confidence) = match self.match_rule(&normalized) {
            Some(rule) => {
                debug!(
                    category = %rule.category,
                    subcategory = rule.subcategory,
                    confidence = rule.confidence,
                    "category rule matched"
                );
                (rule.category, rule.subcategory, rule.confidence)
            }
            None if normalized.content_words().count() < self.min_content_words => (
                Category::Other,
                "Insufficient Detail",
                INSUFFICIENT_DETAIL_CONFIDENCE,
            ),
            None => (Category::Other, "General", NO_MATCH_CONFIDENCE),
        };

        let priority = Self::priority(&normalized);
        let sentiment = Self::sentiment(&normalized);

        ClassificationResult {
            category,
            subcategory: subcategory.to_string(),
            priority,
            urgency_score: Self::urgency(priority, sentiment),
            sentiment,
            keywords: normalized.keywords(),
            suggested_department: Self::department(&normalized, category),
            estimated_resolution_days: priority.resolution_days(),
            confidence,
            source: Source::Rule,
            rule_confidence: None,
            generative_confidence: None,
            processing_time_ms: 0,
        }
    }

    fn match_rule(&self, text: &NormalizedText) -> Option<&'static CategoryRule> {
        self.rules.iter().find(|rule| text.contains_any(rule.terms))
    }

    fn priority(text: &NormalizedText) -> Priority {
        if text.contains_any(URGENT_TERMS) {
            Priority::Urgent
        } else if text.contains_any(HIGH_TERMS) {
            Priority::High
        } else if text.contains_any(LOW_TERMS) {
            Priority::Low
        } else {
            Priority::Medium
        }
    }

    fn sentiment(text: &NormalizedText) -> Sentiment {
        let negative = text.count_terms(NEGATIVE_TERMS);
        let positive = text.count_terms(POSITIVE_TERMS);
        match negative.cmp(&positive) {
            std::cmp::Ordering::Greater => Sentiment::Negative,
            std::cmp::Ordering::Less => Sentiment::Positive,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        }
    }

    fn department(text: &NormalizedText, category: Category) -> Department {
        DEPARTMENT_RULES
            .iter()
            .find(|(terms, _)| text.contains_any(terms))
            .map(|(_, dept)| *dept)
            .unwrap_or_else(|| category.default_department())
    }

    fn urgency(priority: Priority, sentiment: Sentiment) -> u8 {
        let bump = u8::from(sentiment == Sentiment::Negative);
        (priority.base_urgency() + bump).min(*URGENCY_RANGE.end())
    }
}

impl Default for RuleClassifier {
    fn default() -> Self {
        Self::new()
    }
}
