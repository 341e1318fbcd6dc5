// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Triage complaint classification engine.
//!
//! This crate provides the fixed taxonomy, the request/result types, the
//! error type, and the provider adapter traits shared by every other crate
//! in the workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TriageError;
pub use types::{
    Category, ClassificationAudit, ClassificationRequest, ClassificationResult,
    CompletionRequest, CompletionResponse, Department, HealthStatus, Priority, Sentiment, Source,
    MAX_KEYWORDS,
};

pub use traits::{CompletionProvider, PluginAdapter};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn triage_error_has_all_variants() {
        let _config = TriageError::Config("test".into());
        let _provider = TriageError::Provider {
            message: "test".into(),
            source: None,
        };
        let _parse = TriageError::Parse {
            message: "test".into(),
        };
        let _exhausted = TriageError::ProvidersExhausted { attempted: 2 };
        let _timeout = TriageError::Timeout {
            duration: std::time::Duration::from_secs(5),
        };
        let _internal = TriageError::Internal("test".into());
    }

    #[test]
    fn error_kinds_are_distinct() {
        let kinds = [
            TriageError::Provider {
                message: String::new(),
                source: None,
            }
            .kind(),
            TriageError::Parse {
                message: String::new(),
            }
            .kind(),
            TriageError::Timeout {
                duration: std::time::Duration::ZERO,
            }
            .kind(),
        ];
        assert_eq!(kinds, ["provider", "parse", "timeout"]);
    }

    #[test]
    fn category_display_and_parse() {
        assert_eq!(Category::WasteManagement.to_string(), "Waste Management");
        assert_eq!(
            Category::from_str("waste management").unwrap(),
            Category::WasteManagement
        );
        assert_eq!(
            Category::from_str("Roads & Infrastructure").unwrap(),
            Category::RoadsInfrastructure
        );
        assert!(Category::from_str("Potholes").is_err());
    }

    #[test]
    fn every_category_maps_to_a_department() {
        for name in Category::names() {
            let category = Category::from_str(&name).unwrap();
            let dept = category.default_department();
            assert!(Department::names().contains(&dept.to_string()));
        }
        assert_eq!(
            Category::Other.default_department(),
            Department::Administrative
        );
        assert_eq!(
            Department::Administrative.to_string(),
            "Administrative Office"
        );
    }

    #[test]
    fn priority_lookups() {
        assert_eq!(Priority::Urgent.resolution_days(), 1);
        assert_eq!(Priority::Medium.resolution_days(), 7);
        assert_eq!(Priority::Low.resolution_days(), 14);
        assert!(Priority::Urgent > Priority::High);
        assert_eq!(Priority::from_str("URGENT").unwrap(), Priority::Urgent);
        assert_eq!(Priority::names(), vec!["low", "medium", "high", "urgent"]);
    }

    #[test]
    fn result_serializes_with_taxonomy_names() {
        let result = ClassificationResult::default_classification();
        let json = serde_json::to_value(&result).expect("should serialize");
        assert_eq!(json["category"], "Other");
        assert_eq!(json["suggested_department"], "Administrative Office");
        assert_eq!(json["source"], "default");
        assert_eq!(json["priority"], "medium");
        assert!(json.get("rule_confidence").is_none());
    }

    #[test]
    fn default_classification_is_fixed() {
        let result = ClassificationResult::default_classification();
        assert_eq!(result.source, Source::Default);
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.estimated_resolution_days, 7);
        assert_eq!(result.suggested_department, Department::Administrative);
        assert!(result.check_invariants().is_ok());
    }

    #[test]
    fn hybrid_without_sub_confidences_violates_invariants() {
        let mut result = ClassificationResult::default_classification();
        result.source = Source::Hybrid;
        result.rule_confidence = Some(0.7);
        assert!(result.check_invariants().is_err());
        result.generative_confidence = Some(0.9);
        assert!(result.check_invariants().is_ok());
    }

    #[test]
    fn out_of_range_fields_violate_invariants() {
        let mut result = ClassificationResult::default_classification();
        result.urgency_score = 11;
        assert!(result.check_invariants().is_err());

        let mut result = ClassificationResult::default_classification();
        result.keywords = (0..6).map(|i| format!("kw{i}")).collect();
        assert!(result.check_invariants().is_err());
    }

    #[test]
    fn audit_copies_monitoring_fields() {
        let mut result = ClassificationResult::default_classification();
        result.processing_time_ms = 42;
        let audit = ClassificationAudit::from_result(&result);
        assert_eq!(audit.source, Source::Default);
        assert_eq!(audit.processing_time_ms, 42);
        assert_eq!(audit.confidence, 0.5);
        assert!(!audit.audit_id.is_empty());
        assert!(chrono::DateTime::parse_from_rfc3339(&audit.classified_at).is_ok());
    }

    #[test]
    fn request_combined_text() {
        let req = ClassificationRequest::new("  Pothole ", "Big hole on Main St ")
            .with_location("Ward 4");
        assert_eq!(req.combined_text(), "Pothole Big hole on Main St");
        assert_eq!(req.location.as_deref(), Some("Ward 4"));
    }

    #[test]
    fn health_status_display() {
        assert_eq!(HealthStatus::Healthy.to_string(), "healthy");
        assert_eq!(
            HealthStatus::Unhealthy("no API key".into()).to_string(),
            "unhealthy (no API key)"
        );
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_completion_provider<T: CompletionProvider>() {}
    }
}
