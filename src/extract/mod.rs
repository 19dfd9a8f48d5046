// src/extract/mod.rs
// =============================================================================
// This module pulls crawlable links out of page content.
//
// Submodules:
// - links: the internal-link filter used by the crawl frontier
// =============================================================================

mod links;

pub use links::extract_internal_links;
