// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - crawl: index pages reachable from a seed, then report counts for a term
// - lookup: report counts for a term from an index built earlier
//
// Site settings and the index path can also come from WIKICRAWL_*
// environment variables, which is handy in scripts.
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{
    ConfigError, SiteScope, DEFAULT_ARTICLE_PREFIX, DEFAULT_CONTENT_SELECTOR, DEFAULT_ORIGIN,
};

pub const DEFAULT_SEED: &str = "https://en.wikipedia.org/wiki/Java_(programming_language)";
pub const DEFAULT_INDEX: &str = "wikicrawl-index.json";

#[derive(Parser, Debug)]
#[command(
    name = "wikicrawl",
    version,
    about = "Crawl same-site article pages and index the terms they contain",
    long_about = "wikicrawl follows article links outward from a seed page, one page per step, \
                  recording term counts for every page it indexes. Pages already in the index \
                  are never fetched again."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl from a seed page and index what we find
    ///
    /// Example: wikicrawl crawl https://en.wikipedia.org/wiki/Rust_(programming_language) --pages 5
    Crawl {
        /// First page to crawl
        #[arg(default_value = DEFAULT_SEED)]
        seed: String,

        /// Stop after this many pages have been newly indexed
        #[arg(long, default_value_t = 1)]
        pages: usize,

        /// Index file to read and update
        #[arg(long, env = "WIKICRAWL_INDEX", default_value = DEFAULT_INDEX)]
        index: PathBuf,

        /// Read pages from saved copies under this directory instead of the
        /// network (<dir>/<host>/<path>). Pages are re-indexed even if the
        /// index already holds them.
        #[arg(long)]
        fixtures: Option<PathBuf>,

        /// Skip queueing the seed page's links before the first crawl step
        #[arg(long)]
        no_bootstrap: bool,

        /// Queue each link only once, instead of letting repeats pile up
        #[arg(long)]
        dedup: bool,

        /// Log pages that fail to fetch and keep going instead of stopping
        #[arg(long)]
        skip_failures: bool,

        /// Term to report counts for once the crawl stops
        #[arg(long, default_value = "the")]
        term: String,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Show which indexed pages contain a term
    ///
    /// Example: wikicrawl lookup compiler
    Lookup {
        /// Term to look up (case-insensitive)
        term: String,

        /// Index file to read
        #[arg(long, env = "WIKICRAWL_INDEX", default_value = DEFAULT_INDEX)]
        index: PathBuf,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Flags describing which site we stay on.
#[derive(Args, Debug, Clone)]
pub struct ScopeArgs {
    /// Site origin that article links are resolved against
    #[arg(long, env = "WIKICRAWL_ORIGIN", default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Path prefix that marks an article link
    #[arg(long, env = "WIKICRAWL_PREFIX", default_value = DEFAULT_ARTICLE_PREFIX)]
    pub prefix: String,

    /// CSS selector for the paragraph blocks links and terms are taken from
    #[arg(long, env = "WIKICRAWL_SELECTOR", default_value = DEFAULT_CONTENT_SELECTOR)]
    pub selector: String,
}

impl ScopeArgs {
    pub fn to_scope(&self) -> Result<SiteScope, ConfigError> {
        SiteScope::new(&self.origin, &self.prefix, &self.selector)
    }
}
