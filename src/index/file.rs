// src/index/file.rs
// =============================================================================
// An index persisted to a JSON file.
//
// The file is the only source of truth. Nothing is cached between calls:
// - is_indexed and counts_for_term read the file as it is right now
// - index_page reads the file, merges the new page in, and writes it back
// so pages written by another process sharing the file are seen, and kept.
//
// Writes go to a uniquely named temp file in the same directory, which is
// then renamed over the real file. A crash mid-write leaves the previous
// index intact.
//
// Blocking std::fs is fine here: the crawl is driven by one task, one step
// at a time, so nothing else on the runtime waits while a small index file
// is read or written.
//
// File layout (pretty-printed):
//   { "<url>": { "<term>": <count>, ... }, ... }
// =============================================================================

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

use super::{IndexStore, MemoryIndex, StoreError};
use crate::fetch::PageContent;

pub struct JsonFileIndex {
    path: PathBuf,
}

impl JsonFileIndex {
    /// Opens the index at `path`. A missing file means an empty index; a file
    /// that is not a valid index is reported right away.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let index = Self { path: path.into() };
        let pages = index.load()?.len();

        info!(path = %index.path.display(), pages, "opened index");
        Ok(index)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of pages currently in the file.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.load()?.len())
    }

    fn load(&self) -> Result<MemoryIndex, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => serde_json::from_str(&json).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(MemoryIndex::new()),
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, index: &MemoryIndex) -> Result<(), StoreError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        serde_json::to_writer_pretty(&mut tmp, index)?;

        tmp.persist(&self.path).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e.error,
        })?;
        Ok(())
    }
}

impl IndexStore for JsonFileIndex {
    fn is_indexed(&self, url: &str) -> Result<bool, StoreError> {
        self.load()?.is_indexed(url)
    }

    fn index_page(&mut self, url: &str, content: &PageContent) -> Result<(), StoreError> {
        let mut current = self.load()?;
        current.index_page(url, content)?;
        self.save(&current)
    }

    fn counts_for_term(&self, term: &str) -> Result<BTreeMap<String, u32>, StoreError> {
        self.load()?.counts_for_term(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        let index = JsonFileIndex::open(dir.path().join("index.json")).unwrap();
        assert_eq!(index.len().unwrap(), 0);
    }

    #[test]
    fn test_pages_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        let url = "https://en.wikipedia.org/wiki/Rust";

        {
            let mut index = JsonFileIndex::open(&path).unwrap();
            index
                .index_page(url, &PageContent::from_paragraphs(["<p>the borrow checker</p>"]))
                .unwrap();
        }

        let index = JsonFileIndex::open(&path).unwrap();
        assert!(index.is_indexed(url).unwrap());
        assert_eq!(index.counts_for_term("borrow").unwrap().get(url), Some(&1));

        // Only the index itself is left behind, no temp files
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_sees_and_keeps_pages_from_another_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        let a = "https://en.wikipedia.org/wiki/A";
        let b = "https://en.wikipedia.org/wiki/B";

        let mut mine = JsonFileIndex::open(&path).unwrap();
        let mut other = JsonFileIndex::open(&path).unwrap();

        other
            .index_page(a, &PageContent::from_paragraphs(["<p>alpha</p>"]))
            .unwrap();
        assert!(mine.is_indexed(a).unwrap());

        mine.index_page(b, &PageContent::from_paragraphs(["<p>beta</p>"]))
            .unwrap();

        let reopened = JsonFileIndex::open(&path).unwrap();
        assert!(reopened.is_indexed(a).unwrap());
        assert!(reopened.is_indexed(b).unwrap());
        assert_eq!(reopened.len().unwrap(), 2);
        assert!(other.is_indexed(b).unwrap());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(&path, "not json").unwrap();

        let err = JsonFileIndex::open(&path).err().unwrap();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_corruption_after_open_is_reported_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        let index = JsonFileIndex::open(&path).unwrap();

        std::fs::write(&path, "{ truncated").unwrap();
        assert!(matches!(
            index.is_indexed("https://x.org/wiki/A"),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_write_failure_is_store_error() {
        let dir = tempfile::tempdir().unwrap();
        // Parent directory does not exist, so the save must fail
        let path = dir.path().join("missing").join("index.json");
        let mut index = JsonFileIndex::open(&path).unwrap();

        let err = index
            .index_page("https://x.org/wiki/A", &PageContent::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
