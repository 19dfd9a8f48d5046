// src/fetch/fixture.rs
// =============================================================================
// Reads saved pages from disk instead of the network.
//
// A URL maps to a file under the fixture root by host and path:
//   https://en.wikipedia.org/wiki/Rust  ->  <root>/en.wikipedia.org/wiki/Rust
//
// The same URL always yields the same content, so crawl steps driven by this
// source are reproducible. The only expected failure is a missing file.
// =============================================================================

use scraper::Selector;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

use super::{parse_page, ContentSource, FetchError, PageContent};
use crate::config::SiteScope;

/// Deterministic content source backed by a directory of saved pages.
pub struct FixtureSource {
    root: PathBuf,
    selector: Selector,
}

impl FixtureSource {
    pub fn new(root: impl Into<PathBuf>, scope: &SiteScope) -> Result<Self, FetchError> {
        Ok(Self {
            root: root.into(),
            selector: scope.selector()?,
        })
    }

    /// Where the saved copy of `url` is expected to live.
    pub fn path_for(&self, url: &str) -> Result<PathBuf, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| FetchError::InvalidUrl(url.to_string()))?;

        // Url::parse has already resolved "." and ".." segments (plain or
        // percent-encoded), so every segment here stays under the root
        let mut path = self.root.join(host);
        for segment in parsed.path().split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        Ok(path)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentSource for FixtureSource {
    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError> {
        let path = self.path_for(url)?;
        debug!(url, path = %path.display(), "reading fixture");

        let html = match tokio::fs::read_to_string(&path).await {
            Ok(html) => html,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FetchError::MissingFixture {
                    url: url.to_string(),
                    path,
                });
            }
            Err(source) => return Err(FetchError::FixtureRead { path, source }),
        };

        Ok(parse_page(&html, &self.selector))
    }

    fn gated(&self) -> bool {
        false
    }
}
