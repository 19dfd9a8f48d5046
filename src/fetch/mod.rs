// src/fetch/mod.rs
// =============================================================================
// This module turns URLs into page content.
//
// Submodules:
// - live: fetches pages over HTTP with reqwest
// - fixture: reads saved pages from disk, for reproducible crawls
//
// Both implement the ContentSource trait, so the crawl frontier never has to
// know which one it was given. The only behavioral difference the frontier
// sees is `gated()`: a live source is checked against the index before every
// fetch, a fixture source is not.
// =============================================================================

mod fixture;
mod live;

pub use fixture::FixtureSource;
pub use live::LiveFetcher;

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while retrieving a page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    #[error("no fixture for {url} (looked in {})", .path.display())]
    MissingFixture { url: String, path: PathBuf },

    #[error("failed to read fixture {}: {source}", .path.display())]
    FixtureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid URL '{0}'")]
    InvalidUrl(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// One paragraph-level block of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Outer HTML of the block; links are extracted from this.
    pub html: String,
    /// Visible text of the block; terms are counted from this.
    pub text: String,
}

impl Paragraph {
    fn from_element(element: ElementRef<'_>) -> Self {
        Self {
            html: element.html(),
            text: element.text().collect::<Vec<_>>().join(" "),
        }
    }

    /// Builds a paragraph from an HTML fragment such as `<p>...</p>`.
    #[cfg(test)]
    pub fn from_html(html: &str) -> Self {
        let fragment = Html::parse_fragment(html);
        let mut paragraph = Self::from_element(fragment.root_element());
        paragraph.html = html.to_string();
        paragraph
    }
}

/// The article body of one fetched page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    pub paragraphs: Vec<Paragraph>,
}

impl PageContent {
    #[cfg(test)]
    pub fn from_paragraphs<I, S>(blocks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            paragraphs: blocks
                .into_iter()
                .map(|html| Paragraph::from_html(html.as_ref()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

/// Where the frontier gets page content from.
pub trait ContentSource {
    /// Retrieves and parses the page at `url`.
    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError>;

    /// Whether the frontier must consult the index before fetching from this
    /// source. Deterministic sources return false so a crawl step can be
    /// replayed regardless of what the index already holds.
    fn gated(&self) -> bool {
        true
    }
}

/// Selects the paragraph blocks of a full HTML document.
///
/// A page with no matching blocks yields empty content, not an error.
pub fn parse_page(html: &str, selector: &Selector) -> PageContent {
    let document = Html::parse_document(html);

    let paragraphs = document
        .select(selector)
        .map(Paragraph::from_element)
        .collect();

    PageContent { paragraphs }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_selects_body_paragraphs() {
        let html = r#"
            <html><body>
              <div id="nav"><p><a href="/wiki/Nav">nav</a></p></div>
              <div id="mw-content-text">
                <p>First <a href="/wiki/A">alpha</a>.</p>
                <table><tr><td>infobox</td></tr></table>
                <p>Second.</p>
              </div>
            </body></html>
        "#;
        let selector = Selector::parse("#mw-content-text p").unwrap();
        let page = parse_page(html, &selector);

        assert_eq!(page.paragraphs.len(), 2);
        assert!(page.paragraphs[0].html.contains("/wiki/A"));
        assert!(page.paragraphs[0].text.contains("alpha"));
        assert!(!page.paragraphs[0].text.contains("nav"));
        assert_eq!(page.paragraphs[1].text.trim(), "Second.");
    }

    #[test]
    fn test_parse_page_without_matches_is_empty() {
        let selector = Selector::parse("#mw-content-text p").unwrap();
        let page = parse_page("<html><body><p>loose</p></body></html>", &selector);
        assert!(page.is_empty());
    }

    #[test]
    fn test_paragraph_from_html_keeps_text() {
        let paragraph = Paragraph::from_html(r#"<p>See <a href="/wiki/B">beta</a> here</p>"#);
        assert!(paragraph.text.contains("See"));
        assert!(paragraph.text.contains("beta"));
        assert!(paragraph.html.starts_with("<p>"));
    }
}
