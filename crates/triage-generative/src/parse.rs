// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Strict parsing of provider classification replies.
//!
//! A reply is accepted only when it carries a taxonomy category, priority,
//! and department. Optional fields may be absent, but a present optional
//! field that is out of range rejects the whole reply.

use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;
use triage_core::types::{RESOLUTION_DAYS_RANGE, URGENCY_RANGE};
use triage_core::{
    Category, ClassificationResult, Department, Priority, Sentiment, Source, TriageError,
    MAX_KEYWORDS,
};

/// Confidence assumed when a provider omits one.
pub const OMITTED_CONFIDENCE: f64 = 0.8;

/// A validated generative classification.
///
/// Optional fields are `None` when the provider left them out, so the
/// ensemble can fall back to the rule value field by field.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerativeClassification {
    pub category: Category,
    pub subcategory: Option<String>,
    pub priority: Priority,
    pub urgency_score: Option<u8>,
    pub sentiment: Option<Sentiment>,
    pub keywords: Vec<String>,
    pub suggested_department: Department,
    pub estimated_resolution_days: Option<u8>,
    pub confidence: Option<f64>,
}

impl GenerativeClassification {
    /// Confidence to report, substituting [`OMITTED_CONFIDENCE`] when absent.
    pub fn effective_confidence(&self) -> f64 {
        self.confidence.unwrap_or(OMITTED_CONFIDENCE)
    }

    /// Complete result with `source == generative`, filling gaps from priority.
    pub fn to_result(&self) -> ClassificationResult {
        ClassificationResult {
            category: self.category,
            subcategory: self
                .subcategory
                .clone()
                .unwrap_or_else(|| "General".to_string()),
            priority: self.priority,
            urgency_score: self
                .urgency_score
                .unwrap_or_else(|| self.priority.base_urgency()),
            sentiment: self.sentiment.unwrap_or(Sentiment::Neutral),
            keywords: self.keywords.clone(),
            suggested_department: self.suggested_department,
            estimated_resolution_days: self
                .estimated_resolution_days
                .unwrap_or_else(|| self.priority.resolution_days()),
            confidence: self.effective_confidence(),
            source: Source::Generative,
            rule_confidence: None,
            generative_confidence: None,
            processing_time_ms: 0,
        }
    }
}

/// Reply shape before validation. Every field is optional here so that
/// missing required fields produce a targeted error.
#[derive(Debug, Deserialize)]
struct RawReply {
    category: Option<String>,
    subcategory: Option<String>,
    priority: Option<String>,
    urgency_score: Option<f64>,
    sentiment: Option<String>,
    keywords: Option<Vec<String>>,
    suggested_department: Option<String>,
    estimated_resolution_days: Option<f64>,
    confidence: Option<f64>,
}

/// Parse and validate a provider reply.
///
/// Tolerates markdown code fences and prose around the JSON object.
pub fn parse_classification_response(
    response: &str,
) -> Result<GenerativeClassification, TriageError> {
    let json_str =
        extract_json_object(response).ok_or_else(|| parse_error("no JSON object in reply"))?;

    let raw: RawReply = serde_json::from_str(json_str).map_err(|e| {
        debug!("Raw reply: {response}");
        parse_error(format!("malformed JSON: {e}"))
    })?;

    let category = required_enum::<Category>(raw.category, "category")?;
    let priority = required_enum::<Priority>(raw.priority, "priority")?;
    let suggested_department =
        required_enum::<Department>(raw.suggested_department, "suggested_department")?;

    let sentiment = raw
        .sentiment
        .map(|s| {
            Sentiment::from_str(s.trim())
                .map_err(|_| parse_error(format!("sentiment '{s}' is not an allowed value")))
        })
        .transpose()?;

    let urgency_score = raw
        .urgency_score
        .map(|v| bounded_integer(v, "urgency_score", URGENCY_RANGE))
        .transpose()?;
    let estimated_resolution_days = raw
        .estimated_resolution_days
        .map(|v| bounded_integer(v, "estimated_resolution_days", RESOLUTION_DAYS_RANGE))
        .transpose()?;

    if let Some(c) = raw.confidence.filter(|c| !(0.0..=1.0).contains(c)) {
        return Err(parse_error(format!("confidence {c} outside [0,1]")));
    }

    let subcategory = raw
        .subcategory
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Ok(GenerativeClassification {
        category,
        subcategory,
        priority,
        urgency_score,
        sentiment,
        keywords: clean_keywords(raw.keywords.unwrap_or_default()),
        suggested_department,
        estimated_resolution_days,
        confidence: raw.confidence,
    })
}

/// Slice from the first `{` to the last `}`.
fn extract_json_object(response: &str) -> Option<&str> {
    let trimmed = response.trim();
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    (start < end).then(|| &trimmed[start..=end])
}

fn required_enum<T: FromStr>(value: Option<String>, field: &str) -> Result<T, TriageError> {
    let value = value.ok_or_else(|| parse_error(format!("missing required field '{field}'")))?;
    T::from_str(value.trim())
        .map_err(|_| parse_error(format!("{field} '{value}' is not an allowed value")))
}

fn bounded_integer(
    value: f64,
    field: &str,
    range: std::ops::RangeInclusive<u8>,
) -> Result<u8, TriageError> {
    let in_range = value.fract() == 0.0
        && value >= f64::from(*range.start())
        && value <= f64::from(*range.end());
    if !in_range {
        return Err(parse_error(format!(
            "{field} {value} is not an integer in [{}, {}]",
            range.start(),
            range.end()
        )));
    }
    Ok(value as u8)
}

fn clean_keywords(keywords: Vec<String>) -> Vec<String> {
    keywords
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .take(MAX_KEYWORDS)
        .collect()
}

fn parse_error(message: impl Into<String>) -> TriageError {
    TriageError::Parse {
        message: message.into(),
    }
}
