// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification taxonomy, request/result types, and provider message types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Maximum number of keywords carried on a result.
pub const MAX_KEYWORDS: usize = 5;

/// Inclusive bounds for `urgency_score`.
pub const URGENCY_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// Inclusive bounds for `estimated_resolution_days`.
pub const RESOLUTION_DAYS_RANGE: std::ops::RangeInclusive<u8> = 1..=30;

/// Complaint categories. The set is fixed; classifiers may never emit anything else.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    #[strum(serialize = "Roads & Infrastructure")]
    #[serde(rename = "Roads & Infrastructure")]
    RoadsInfrastructure,
    #[strum(serialize = "Water Supply")]
    #[serde(rename = "Water Supply")]
    WaterSupply,
    #[strum(serialize = "Electricity")]
    #[serde(rename = "Electricity")]
    Electricity,
    #[strum(serialize = "Waste Management")]
    #[serde(rename = "Waste Management")]
    WasteManagement,
    #[strum(serialize = "Sanitation & Drainage")]
    #[serde(rename = "Sanitation & Drainage")]
    SanitationDrainage,
    #[strum(serialize = "Public Safety")]
    #[serde(rename = "Public Safety")]
    PublicSafety,
    #[strum(serialize = "Public Transport")]
    #[serde(rename = "Public Transport")]
    PublicTransport,
    #[strum(serialize = "Public Health")]
    #[serde(rename = "Public Health")]
    PublicHealth,
    #[strum(serialize = "Environment")]
    #[serde(rename = "Environment")]
    Environment,
    #[strum(serialize = "Administrative Services")]
    #[serde(rename = "Administrative Services")]
    AdministrativeServices,
    #[strum(serialize = "Other")]
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// The department that owns this category when nothing more specific applies.
    pub fn default_department(self) -> Department {
        match self {
            Category::RoadsInfrastructure => Department::PublicWorks,
            Category::WaterSupply => Department::WaterSupply,
            Category::Electricity => Department::Electricity,
            Category::WasteManagement | Category::SanitationDrainage => Department::Sanitation,
            Category::PublicSafety => Department::Police,
            Category::PublicTransport => Department::Transport,
            Category::PublicHealth => Department::Health,
            Category::Environment => Department::Environment,
            Category::AdministrativeServices | Category::Other => Department::Administrative,
        }
    }

    /// Display names of every category, in declaration order.
    pub fn names() -> Vec<String> {
        Category::iter().map(|c| c.to_string()).collect()
    }
}

/// Departments a complaint can be routed to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Department {
    #[strum(serialize = "Public Works Department")]
    #[serde(rename = "Public Works Department")]
    PublicWorks,
    #[strum(serialize = "Water Supply Department")]
    #[serde(rename = "Water Supply Department")]
    WaterSupply,
    #[strum(serialize = "Electricity Department")]
    #[serde(rename = "Electricity Department")]
    Electricity,
    #[strum(serialize = "Sanitation Department")]
    #[serde(rename = "Sanitation Department")]
    Sanitation,
    #[strum(serialize = "Police Department")]
    #[serde(rename = "Police Department")]
    Police,
    #[strum(serialize = "Transport Department")]
    #[serde(rename = "Transport Department")]
    Transport,
    #[strum(serialize = "Health Department")]
    #[serde(rename = "Health Department")]
    Health,
    #[strum(serialize = "Environment Department")]
    #[serde(rename = "Environment Department")]
    Environment,
    #[strum(serialize = "Administrative Office")]
    #[serde(rename = "Administrative Office")]
    Administrative,
}

impl Department {
    /// Display names of every department, in declaration order.
    pub fn names() -> Vec<String> {
        Department::iter().map(|d| d.to_string()).collect()
    }
}

/// Complaint priority.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Fixed resolution-time estimate for this priority.
    pub fn resolution_days(self) -> u8 {
        match self {
            Priority::Urgent => 1,
            Priority::High => 3,
            Priority::Medium => 7,
            Priority::Low => 14,
        }
    }

    /// Urgency score before sentiment adjustment.
    pub fn base_urgency(self) -> u8 {
        match self {
            Priority::Low => 3,
            Priority::Medium => 5,
            Priority::High => 7,
            Priority::Urgent => 9,
        }
    }

    /// Lowercase names of every priority.
    pub fn names() -> Vec<String> {
        Priority::iter().map(|p| p.to_string()).collect()
    }
}

/// Tone of the complaint text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Lowercase names of every sentiment.
    pub fn names() -> Vec<String> {
        Sentiment::iter().map(|s| s.to_string()).collect()
    }
}

/// Which path produced a result.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Rule,
    Generative,
    Hybrid,
    Default,
}

/// A complaint to classify. Created per call and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ClassificationRequest {
    /// Creates a request without a location.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            location: None,
        }
    }

    /// Attaches a location to the request.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Title and description joined as the text the rule classifier sees.
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.title.trim(), self.description.trim())
    }
}

/// A fully populated classification of one complaint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub subcategory: String,
    pub priority: Priority,
    pub urgency_score: u8,
    pub sentiment: Sentiment,
    pub keywords: Vec<String>,
    pub suggested_department: Department,
    pub estimated_resolution_days: u8,
    pub confidence: f64,
    pub source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generative_confidence: Option<f64>,
    pub processing_time_ms: u64,
}

impl ClassificationResult {
    /// Confidence assigned to the fixed default classification.
    pub const DEFAULT_CONFIDENCE: f64 = 0.5;

    /// The fixed, non-computed classification returned when every path fails.
    pub fn default_classification() -> Self {
        let category = Category::Other;
        let priority = Priority::Medium;
        Self {
            category,
            subcategory: "General".to_string(),
            priority,
            urgency_score: priority.base_urgency(),
            sentiment: Sentiment::Neutral,
            keywords: Vec::new(),
            suggested_department: category.default_department(),
            estimated_resolution_days: priority.resolution_days(),
            confidence: Self::DEFAULT_CONFIDENCE,
            source: Source::Default,
            rule_confidence: None,
            generative_confidence: None,
            processing_time_ms: 0,
        }
    }

    /// Checks the range and provenance invariants every emitted result must hold.
    ///
    /// Returns a description of the first violation found.
    pub fn check_invariants(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!("confidence {} outside [0,1]", self.confidence));
        }
        if !URGENCY_RANGE.contains(&self.urgency_score) {
            return Err(format!("urgency_score {} outside [1,10]", self.urgency_score));
        }
        if !RESOLUTION_DAYS_RANGE.contains(&self.estimated_resolution_days) {
            return Err(format!(
                "estimated_resolution_days {} outside [1,30]",
                self.estimated_resolution_days
            ));
        }
        if self.keywords.len() > MAX_KEYWORDS {
            return Err(format!("{} keywords, at most {MAX_KEYWORDS}", self.keywords.len()));
        }
        if self.subcategory.trim().is_empty() {
            return Err("subcategory is empty".to_string());
        }
        let both = self.rule_confidence.is_some() && self.generative_confidence.is_some();
        if self.source == Source::Hybrid && !both {
            return Err("hybrid result missing a sub-confidence".to_string());
        }
        for c in [self.rule_confidence, self.generative_confidence].into_iter().flatten() {
            if !(0.0..=1.0).contains(&c) {
                return Err(format!("sub-confidence {c} outside [0,1]"));
            }
        }
        Ok(())
    }
}

/// Monitoring record the caller persists alongside the complaint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationAudit {
    pub audit_id: String,
    pub source: Source,
    pub category: Category,
    pub suggested_department: Department,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generative_confidence: Option<f64>,
    pub processing_time_ms: u64,
    pub classified_at: String,
}

impl ClassificationAudit {
    /// Captures the monitoring fields of a finished classification.
    pub fn from_result(result: &ClassificationResult) -> Self {
        Self {
            audit_id: uuid::Uuid::new_v4().to_string(),
            source: result.source,
            category: result.category,
            suggested_department: result.suggested_department,
            confidence: result.confidence,
            rule_confidence: result.rule_confidence,
            generative_confidence: result.generative_confidence,
            processing_time_ms: result.processing_time_ms,
            classified_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is ready to take requests.
    Healthy,
    /// Adapter cannot serve requests; the reason is shown to operators.
    Unhealthy(String),
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => f.write_str("healthy"),
            HealthStatus::Unhealthy(reason) => write!(f, "unhealthy ({reason})"),
        }
    }
}

// --- Provider types ---

/// A single-turn completion request sent to a model provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Optional system instruction.
    pub system_prompt: Option<String>,
    /// The user prompt.
    pub prompt: String,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Ask the provider for a JSON object reply where it supports that.
    pub json_output: bool,
}

/// The text a provider returned for a [`CompletionRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub id: String,
    pub content: String,
    pub model: String,
}
