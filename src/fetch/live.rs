// src/fetch/live.rs
// =============================================================================
// Fetches pages over HTTP.
//
// One reqwest Client is built up front and reused for the whole crawl
// (connection pooling). Every response must be 2xx; anything else is a
// FetchError, never a page with empty content.
// =============================================================================

use reqwest::Client;
use scraper::Selector;
use std::time::Duration;
use tracing::debug;

use super::{parse_page, ContentSource, FetchError, PageContent};
use crate::config::SiteScope;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_REDIRECTS: usize = 5;
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Content source backed by the network.
pub struct LiveFetcher {
    client: Client,
    selector: Selector,
}

impl LiveFetcher {
    pub fn new(scope: &SiteScope) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            selector: scope.selector()?,
        })
    }
}

impl ContentSource for LiveFetcher {
    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError> {
        debug!(url, "fetching page");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        let page = parse_page(&html, &self.selector);
        debug!(url, paragraphs = page.paragraphs.len(), "parsed page");
        Ok(page)
    }
}
