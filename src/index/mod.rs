// src/index/mod.rs
// =============================================================================
// This module records which pages have been indexed and what terms they hold.
//
// Submodules:
// - terms: counting the terms of one page
// - memory: an in-process index (BTreeMaps)
// - file: the in-process index persisted as a JSON file
//
// The crawl frontier only ever talks to the IndexStore trait. It asks
// "is this URL indexed?" before fetching and calls index_page after.
// counts_for_term is for lookups once the crawl is done.
// =============================================================================

mod file;
mod memory;
mod terms;

pub use file::JsonFileIndex;
pub use memory::MemoryIndex;
pub use terms::TermCounts;

use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

use crate::fetch::PageContent;

/// Errors raised while reading or writing index state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("index I/O failed for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("index file {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode index: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Per-URL indexed state and term statistics.
pub trait IndexStore {
    fn is_indexed(&self, url: &str) -> Result<bool, StoreError>;

    /// Records the terms of `content` under `url`, replacing anything stored
    /// for that URL before.
    fn index_page(&mut self, url: &str, content: &PageContent) -> Result<(), StoreError>;

    /// How often `term` occurs on each indexed page that contains it.
    fn counts_for_term(&self, term: &str) -> Result<BTreeMap<String, u32>, StoreError>;
}
