// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification prompt construction.

use triage_core::{Category, ClassificationRequest, Department, Priority, Sentiment};

/// System instruction sent with every classification prompt.
pub const SYSTEM_PROMPT: &str =
    "You classify municipal citizen complaints. Reply with a single JSON object and nothing else.";

const CLASSIFICATION_PROMPT: &str = r#"Classify the complaint below.

Allowed values:
- "category": one of {categories}
- "priority": one of {priorities}
- "sentiment": one of {sentiments}
- "suggested_department": one of {departments}

Return a JSON object with these fields:
- "category" (required)
- "subcategory": a short label within the category
- "priority" (required)
- "urgency_score": integer from 1 to 10
- "sentiment"
- "keywords": up to 5 short keywords from the complaint
- "suggested_department" (required)
- "estimated_resolution_days": integer from 1 to 30
- "confidence": number from 0 to 1

Use the allowed values exactly as written."#;

/// Render the classification prompt for a request.
///
/// Every allowed category, department, priority, and sentiment is listed
/// so the reply can be validated against the same sets. Complaint text is
/// appended after substitution and is never scanned for placeholders.
pub fn build_classification_prompt(request: &ClassificationRequest) -> String {
    let instructions = CLASSIFICATION_PROMPT
        .replace("{categories}", &quoted_list(&Category::names()))
        .replace("{priorities}", &quoted_list(&Priority::names()))
        .replace("{sentiments}", &quoted_list(&Sentiment::names()))
        .replace("{departments}", &quoted_list(&Department::names()));
    let title = request.title.trim();
    let description = request.description.trim();
    let location = request
        .location
        .as_deref()
        .map(str::trim)
        .unwrap_or("not provided");

    format!(
        "{instructions}\n\nTitle: {title}\nDescription: {description}\nLocation: {location}\n\nOutput JSON only, no explanation:"
    )
}

fn quoted_list(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("\"{n}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_lists_full_taxonomy() {
        let prompt = build_classification_prompt(&ClassificationRequest::new("t", "d"));
        for name in Category::names()
            .into_iter()
            .chain(Department::names())
            .chain(Priority::names())
            .chain(Sentiment::names())
        {
            assert!(prompt.contains(&format!("\"{name}\"")), "missing {name}");
        }
    }

    #[test]
    fn prompt_embeds_request_fields() {
        let req = ClassificationRequest::new("  Pothole ", "Deep hole near gate").with_location("Ward 12");
        let prompt = build_classification_prompt(&req);
        assert!(prompt.contains("Title: Pothole\n"));
        assert!(prompt.contains("Description: Deep hole near gate"));
        assert!(prompt.contains("Location: Ward 12"));
        assert!(!prompt.contains("{categories}"));
        assert!(prompt.ends_with("Output JSON only, no explanation:"));
    }

    #[test]
    fn braces_in_complaint_text_are_kept_verbatim() {
        let req = ClassificationRequest::new("See {description}", "Near {location} and {categories}")
            .with_location("Ward 9");
        let prompt = build_classification_prompt(&req);
        assert!(prompt.contains("Title: See {description}\n"));
        assert!(prompt.contains("Description: Near {location} and {categories}\n"));
        assert!(prompt.contains("Location: Ward 9\n"));
    }

    #[test]
    fn missing_location_is_stated() {
        let prompt = build_classification_prompt(&ClassificationRequest::new("a", "b"));
        assert!(prompt.contains("Location: not provided"));
    }
}
