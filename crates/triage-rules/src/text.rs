// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text normalization, whole-word term matching, and keyword extraction.

use std::collections::HashSet;
use std::sync::LazyLock;

use triage_core::MAX_KEYWORDS;

/// Stop words excluded from keywords, parsed once from the bundled asset.
static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    include_str!("../assets/stopwords.txt")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
});

/// Shortest token (in chars) that counts as a content word.
const MIN_WORD_CHARS: usize = 3;

/// Returns true if `word` is in the stop-word asset.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Lowercased alphanumeric tokens of a complaint.
#[derive(Debug, Clone)]
pub struct NormalizedText {
    tokens: Vec<String>,
}

impl NormalizedText {
    /// Lowercases `text` and splits it on every non-alphanumeric character.
    pub fn new(text: &str) -> Self {
        let tokens = text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        Self { tokens }
    }

    /// All tokens in order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Whether `term` (one or more words) occurs as whole words.
    ///
    /// The last word of the term also matches its `s`/`es` plural.
    pub fn contains_term(&self, term: &str) -> bool {
        let parts: Vec<&str> = term.split_whitespace().collect();
        let Some(last) = parts.len().checked_sub(1) else {
            return false;
        };
        self.tokens.windows(parts.len()).any(|window| {
            window.iter().zip(&parts).enumerate().all(|(i, (token, part))| {
                token == part || (i == last && is_plural_of(token, part))
            })
        })
    }

    /// Whether any of `terms` occurs.
    pub fn contains_any(&self, terms: &[&str]) -> bool {
        terms.iter().any(|t| self.contains_term(t))
    }

    /// Number of distinct `terms` that occur.
    pub fn count_terms(&self, terms: &[&str]) -> usize {
        terms.iter().filter(|t| self.contains_term(t)).count()
    }

    /// Tokens that carry meaning: not stop words, not numbers, long enough.
    pub fn content_words(&self) -> impl Iterator<Item = &str> {
        self.tokens
            .iter()
            .map(String::as_str)
            .filter(|t| t.chars().count() >= MIN_WORD_CHARS)
            .filter(|t| !t.chars().all(|c| c.is_ascii_digit()))
            .filter(|t| !is_stop_word(t))
    }

    /// Up to [`MAX_KEYWORDS`] distinct content words in first-seen order.
    pub fn keywords(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.content_words()
            .filter(|w| seen.insert(*w))
            .take(MAX_KEYWORDS)
            .map(str::to_string)
            .collect()
    }
}

fn is_plural_of(token: &str, base: &str) -> bool {
    token.strip_suffix('s') == Some(base) || token.strip_suffix("es") == Some(base)
}
