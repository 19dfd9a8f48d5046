// src/crawl/frontier.rs
// =============================================================================
// The crawl frontier: a FIFO queue of URLs and the one-step crawl state
// machine that drains it.
//
// One call to crawl():
// 1. Pop the front URL (an empty queue is a caller error)
// 2. If the source is gated and the index already has the URL, stop here and
//    report "nothing indexed". The URL is dropped, not re-queued.
// 3. Fetch the page
// 4. Index the page
// 5. Push every internal link on the page onto the back of the queue
// 6. Return the URL we indexed
//
// Any fetch or store error ends the step right where it happened: nothing
// after it runs and the popped URL is gone.
//
// The frontier owns its index and content source. They are handed over at
// construction and live as long as the frontier does.
// =============================================================================

use std::collections::{HashSet, VecDeque};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::SiteScope;
use crate::extract::extract_internal_links;
use crate::fetch::{ContentSource, FetchError, PageContent};
use crate::index::{IndexStore, StoreError};

/// Errors that end a crawl step.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("crawl called on an empty frontier")]
    EmptyQueue,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What happens to a link when it is pushed onto the queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnqueuePolicy {
    /// Push every link, even ones already queued or crawled. Repeats are
    /// weeded out when popped, by the index check.
    #[default]
    AllowDuplicates,
    /// Push a link only the first time this frontier sees it.
    SkipSeen,
}

pub struct Frontier<S, C> {
    seed: String,
    queue: VecDeque<String>,
    store: S,
    source: C,
    scope: SiteScope,
    policy: EnqueuePolicy,
    // Only filled under EnqueuePolicy::SkipSeen
    seen: HashSet<String>,
}

impl<S, C> Frontier<S, C>
where
    S: IndexStore,
    C: ContentSource,
{
    /// Creates a frontier holding just `seed`.
    pub fn new(seed: impl Into<String>, store: S, source: C, scope: SiteScope) -> Self {
        Self::with_policy(seed, store, source, scope, EnqueuePolicy::default())
    }

    pub fn with_policy(
        seed: impl Into<String>,
        store: S,
        source: C,
        scope: SiteScope,
        policy: EnqueuePolicy,
    ) -> Self {
        let seed = seed.into();

        let mut seen = HashSet::new();
        if policy == EnqueuePolicy::SkipSeen {
            seen.insert(seed.clone());
        }

        Self {
            queue: VecDeque::from([seed.clone()]),
            seed,
            store,
            source,
            scope,
            policy,
            seen,
        }
    }

    /// Runs one crawl step.
    ///
    /// Returns `Ok(Some(url))` when `url` was indexed, `Ok(None)` when the
    /// popped URL was already indexed and the step did nothing.
    pub async fn crawl(&mut self) -> Result<Option<String>, CrawlError> {
        let url = self.queue.pop_front().ok_or(CrawlError::EmptyQueue)?;

        if self.source.gated() && self.store.is_indexed(&url)? {
            debug!(url = %url, "already indexed, skipping");
            return Ok(None);
        }

        let content = self.source.fetch(&url).await?;
        self.store.index_page(&url, &content)?;
        let queued = self.queue_internal_links(&content);

        info!(url = %url, queued, pending = self.queue.len(), "indexed page");
        Ok(Some(url))
    }

    /// Pushes the internal links of `content` without indexing the page.
    /// Returns how many links were pushed.
    pub fn queue_internal_links(&mut self, content: &PageContent) -> usize {
        let before = self.queue.len();

        for link in extract_internal_links(content, &self.scope) {
            match self.policy {
                EnqueuePolicy::AllowDuplicates => self.queue.push_back(link),
                EnqueuePolicy::SkipSeen => {
                    if self.seen.insert(link.clone()) {
                        self.queue.push_back(link);
                    }
                }
            }
        }

        self.queue.len() - before
    }

    pub fn queue_size(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn source(&self) -> &C {
        &self.source
    }

    /// Gives back the index once the crawl is over.
    pub fn into_store(self) -> S {
        self.store
    }
}
