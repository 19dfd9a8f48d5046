// src/index/memory.rs
// =============================================================================
// An index that lives entirely in memory.
//
// Used on its own for throwaway crawls, and as the state behind
// JsonFileIndex. BTreeMap keeps URLs sorted, so lookups and the JSON file
// come out in a stable order.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::{IndexStore, StoreError, TermCounts};
use crate::fetch::PageContent;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryIndex {
    pages: BTreeMap<String, TermCounts>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indexed pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }
}

impl IndexStore for MemoryIndex {
    fn is_indexed(&self, url: &str) -> Result<bool, StoreError> {
        Ok(self.pages.contains_key(url))
    }

    fn index_page(&mut self, url: &str, content: &PageContent) -> Result<(), StoreError> {
        let counts = TermCounts::from_page(content);
        debug!(url, terms = counts.len(), "indexing page");
        self.pages.insert(url.to_string(), counts);
        Ok(())
    }

    fn counts_for_term(&self, term: &str) -> Result<BTreeMap<String, u32>, StoreError> {
        let term = term.to_lowercase();
        Ok(self
            .pages
            .iter()
            .filter_map(|(url, counts)| match counts.get(&term) {
                0 => None,
                n => Some((url.clone(), n)),
            })
            .collect())
    }
}
