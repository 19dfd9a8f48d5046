// src/config.rs
// =============================================================================
// Site scope: the fixed facts about which site we crawl.
//
// A crawl only ever follows links that:
// - live under one origin (e.g. https://en.wikipedia.org)
// - start with one article path prefix (e.g. /wiki/)
// - appear inside the paragraph blocks picked out by one CSS selector
//
// The CLI builds a SiteScope from flags (or WIKICRAWL_* environment variables)
// and every other module borrows it.
// =============================================================================

use scraper::Selector;
use thiserror::Error;
use url::Url;

pub const DEFAULT_ORIGIN: &str = "https://en.wikipedia.org";
pub const DEFAULT_ARTICLE_PREFIX: &str = "/wiki/";
pub const DEFAULT_CONTENT_SELECTOR: &str = "#mw-content-text p";

/// Errors raised while validating a site scope.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid origin '{0}': must be an http(s) URL with a host")]
    InvalidOrigin(String),

    #[error("invalid article prefix '{0}': must start with '/'")]
    InvalidPrefix(String),

    #[error("invalid content selector '{0}'")]
    InvalidSelector(String),
}

/// The site a crawl is confined to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteScope {
    /// Scheme and host with no trailing slash, e.g. `https://en.wikipedia.org`.
    pub origin: String,
    /// Path prefix identifying article links, e.g. `/wiki/`.
    pub article_prefix: String,
    /// CSS selector for the paragraph blocks of a page.
    pub content_selector: String,
}

impl Default for SiteScope {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            article_prefix: DEFAULT_ARTICLE_PREFIX.to_string(),
            content_selector: DEFAULT_CONTENT_SELECTOR.to_string(),
        }
    }
}

impl SiteScope {
    /// Builds a validated scope.
    ///
    /// A trailing `/` on the origin is dropped so that `origin + "/wiki/X"`
    /// never produces a double slash.
    pub fn new(origin: &str, article_prefix: &str, content_selector: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(origin).map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ConfigError::InvalidOrigin(origin.to_string()));
        }

        if !article_prefix.starts_with('/') {
            return Err(ConfigError::InvalidPrefix(article_prefix.to_string()));
        }

        if Selector::parse(content_selector).is_err() {
            return Err(ConfigError::InvalidSelector(content_selector.to_string()));
        }

        Ok(Self {
            origin: origin.trim_end_matches('/').to_string(),
            article_prefix: article_prefix.to_string(),
            content_selector: content_selector.to_string(),
        })
    }

    /// Parses the content selector. Validated in `new`, so this only fails
    /// for a scope assembled by hand with a bad selector.
    pub fn selector(&self) -> Result<Selector, ConfigError> {
        Selector::parse(&self.content_selector)
            .map_err(|_| ConfigError::InvalidSelector(self.content_selector.clone()))
    }

    /// Turns a site-relative href into an absolute URL, or `None` when the href
    /// is not an article link.
    pub fn resolve(&self, href: &str) -> Option<String> {
        if href.starts_with(&self.article_prefix) {
            Some(format!("{}{}", self.origin, href))
        } else {
            None
        }
    }
}
