// src/crawl/mod.rs
// =============================================================================
// This module drives the crawl.
//
// Features:
// - FIFO frontier seeded with a single URL
// - One page per crawl() call, so the caller owns the loop
// - Already-indexed pages are skipped at pop time, not at push time
// - Optional seen-set for callers that want push-time dedup instead
//
// Rust concepts:
// - Generics: the frontier works with any IndexStore and ContentSource
// - VecDeque: push_back() to queue, pop_front() to take the oldest URL
// =============================================================================

mod frontier;

pub use frontier::{CrawlError, EnqueuePolicy, Frontier};
