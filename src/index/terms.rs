// src/index/terms.rs
// =============================================================================
// Counts the terms on one page.
//
// A term is a run of letters/digits. Punctuation and symbols split terms, and
// everything is lowercased, so "Rust's" counts as "rust" and "s".
// =============================================================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::fetch::PageContent;

/// Term -> number of occurrences on a single page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermCounts {
    counts: BTreeMap<String, u32>,
}

impl TermCounts {
    pub fn from_page(content: &PageContent) -> Self {
        let mut counts = Self::default();
        for paragraph in &content.paragraphs {
            counts.add_text(&paragraph.text);
        }
        counts
    }

    pub fn add_text(&mut self, text: &str) {
        let cleaned: String = text
            .chars()
            .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
            .collect();

        for term in cleaned.to_lowercase().split_whitespace() {
            *self.counts.entry(term.to_string()).or_insert(0) += 1;
        }
    }

    /// Occurrences of `term`; 0 when absent.
    pub fn get(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.counts.len()
    }
}
