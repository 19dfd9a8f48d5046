// src/main.rs
// =============================================================================
// This is the entry point of the wikicrawl CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, filtered by RUST_LOG)
// 3. Wire a frontier to a content source and the on-disk index
// 4. Call crawl() until enough pages are indexed or the queue runs dry
// 5. Print term counts and exit (0 = success, 2 = error)
// =============================================================================

mod cli;
mod config;
mod crawl;
mod extract;
mod fetch;
mod index;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use crawl::{CrawlError, EnqueuePolicy, Frontier};
use fetch::{ContentSource, FixtureSource, LiveFetcher};
use index::{IndexStore, JsonFileIndex};

#[tokio::main]
async fn main() {
    init_logging();

    let result = run().await;
    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    std::process::exit(exit_code(&result));
}

// 0 = the command ran (even if nothing new was indexed or nothing matched)
// 2 = error
fn exit_code(result: &Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => 2,
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl {
            seed,
            pages,
            index,
            fixtures,
            no_bootstrap,
            dedup,
            skip_failures,
            term,
            json,
            scope,
        } => {
            let scope = scope.to_scope().context("invalid site settings")?;
            let store = JsonFileIndex::open(&index)
                .with_context(|| format!("failed to open index {}", index.display()))?;
            let policy = if dedup {
                EnqueuePolicy::SkipSeen
            } else {
                EnqueuePolicy::AllowDuplicates
            };
            let opts = DriveOptions {
                target: pages,
                bootstrap: !no_bootstrap,
                skip_failures,
            };

            let (store, indexed) = match fixtures {
                Some(dir) => {
                    let source = FixtureSource::new(&dir, &scope)?;
                    info!(root = %source.root().display(), "reading pages from fixtures");
                    drive(Frontier::with_policy(seed, store, source, scope, policy), &opts).await?
                }
                None => {
                    let source = LiveFetcher::new(&scope)?;
                    drive(Frontier::with_policy(seed, store, source, scope, policy), &opts).await?
                }
            };

            let total = store.len()?;
            info!(
                indexed = indexed.len(),
                total,
                path = %store.path().display(),
                "crawl finished"
            );

            let counts = store.counts_for_term(&term)?;
            print_report(&TermReport::new(&term, indexed, counts), json)

        }
        Commands::Lookup { term, index, json } => {
            let store = JsonFileIndex::open(&index)
                .with_context(|| format!("failed to open index {}", index.display()))?;
            let counts = store.counts_for_term(&term)?;
            print_report(&TermReport::new(&term, Vec::new(), counts), json)
        }
    }
}

struct DriveOptions {
    target: usize,
    bootstrap: bool,
    skip_failures: bool,
}

// Calls crawl() until `target` pages were newly indexed or the frontier is
// empty. Returns the index and the URLs indexed along the way.
async fn drive<S, C>(mut frontier: Frontier<S, C>, opts: &DriveOptions) -> Result<(S, Vec<String>)>
where
    S: IndexStore,
    C: ContentSource,
{
    info!(seed = frontier.seed(), target = opts.target, "starting crawl");

    if opts.bootstrap {
        let queued = bootstrap(&mut frontier).await?;
        info!(queued, "queued links from seed page");
    }

    let mut indexed = Vec::new();
    while indexed.len() < opts.target && !frontier.is_empty() {
        match frontier.crawl().await {
            Ok(Some(url)) => indexed.push(url),
            Ok(None) => {}
            Err(CrawlError::Fetch(e)) if opts.skip_failures => {
                warn!(error = %e, pending = frontier.queue_size(), "skipping page");
            }
            Err(e) => return Err(e).context("crawl step failed"),
        }
    }

    if frontier.is_empty() && indexed.len() < opts.target {
        info!("frontier exhausted");
    }

    Ok((frontier.into_store(), indexed))
}

// Fetches the seed and queues its links without indexing it. The seed stays
// at the front of the queue, so the first crawl step still indexes it.
async fn bootstrap<S, C>(frontier: &mut Frontier<S, C>) -> Result<usize>
where
    S: IndexStore,
    C: ContentSource,
{
    let seed = frontier.seed().to_string();
    let content = frontier
        .source()
        .fetch(&seed)
        .await
        .with_context(|| format!("failed to fetch seed {seed}"))?;
    if content.is_empty() {
        warn!(seed = %seed, "seed page has no paragraph blocks");
    }
    Ok(frontier.queue_internal_links(&content))
}

#[derive(Debug, Serialize)]
struct TermReport {
    term: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    indexed: Vec<String>,
    pages: Vec<TermHit>,
}

#[derive(Debug, Serialize)]
struct TermHit {
    url: String,
    count: u32,
}

impl TermReport {
    // Most frequent first, ties broken by URL
    fn new(term: &str, indexed: Vec<String>, counts: BTreeMap<String, u32>) -> Self {
        let mut pages: Vec<TermHit> = counts
            .into_iter()
            .map(|(url, count)| TermHit { url, count })
            .collect();
        pages.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.url.cmp(&b.url)));

        Self {
            term: term.to_lowercase(),
            indexed,
            pages,
        }
    }
}

fn print_report(report: &TermReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_table(report);
    }
    Ok(())
}

fn print_table(report: &TermReport) {
    for url in &report.indexed {
        println!("Indexed: {}", url);
    }
    if !report.indexed.is_empty() {
        println!();
    }

    println!("{:<80} {:>8}", "URL", "COUNT");
    println!("{}", "=".repeat(89));

    for hit in &report.pages {
        let url_display = if hit.url.chars().count() > 77 {
            format!("{}...", hit.url.chars().take(77).collect::<String>())
        } else {
            hit.url.clone()
        };
        println!("{:<80} {:>8}", url_display, hit.count);
    }

    println!();
    println!("'{}' appears on {} page(s)", report.term, report.pages.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteScope;
    use crate::index::MemoryIndex;
    use std::path::Path;

    fn write_page(root: &Path, title: &str, body: &str) {
        let dir = root.join("en.wikipedia.org").join("wiki");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(title),
            format!(r#"<html><body><div id="mw-content-text">{body}</div></body></html>"#),
        )
        .unwrap();
    }

    fn fixtures() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write_page(
            dir.path(),
            "Seed",
            r#"<p>The seed links to <a href="/wiki/A">A</a> and <a href="/wiki/B">B</a>.</p>"#,
        );
        write_page(dir.path(), "A", "<p>the alpha page, the end</p>");
        dir
    }

    fn frontier(root: &Path) -> Frontier<MemoryIndex, FixtureSource> {
        let scope = SiteScope::default();
        let source = FixtureSource::new(root, &scope).unwrap();
        Frontier::new(
            "https://en.wikipedia.org/wiki/Seed",
            MemoryIndex::new(),
            source,
            scope,
        )
    }

    #[tokio::test]
    async fn test_drive_stops_at_target() {
        let dir = fixtures();
        let opts = DriveOptions {
            target: 2,
            bootstrap: false,
            skip_failures: false,
        };

        let (store, indexed) = drive(frontier(dir.path()), &opts).await.unwrap();
        assert_eq!(
            indexed,
            vec![
                "https://en.wikipedia.org/wiki/Seed".to_string(),
                "https://en.wikipedia.org/wiki/A".to_string(),
            ]
        );
        assert_eq!(store.counts_for_term("the").unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_drive_aborts_on_missing_page() {
        let dir = fixtures();
        let opts = DriveOptions {
            target: 10,
            bootstrap: false,
            skip_failures: false,
        };

        // B has no saved copy
        assert!(drive(frontier(dir.path()), &opts).await.is_err());
    }

    #[tokio::test]
    async fn test_drive_can_skip_failures() {
        let dir = fixtures();
        let opts = DriveOptions {
            target: 10,
            bootstrap: true,
            skip_failures: true,
        };

        let (store, indexed) = drive(frontier(dir.path()), &opts).await.unwrap();
        // Seed, the bootstrapped A, then A again from the seed's own links.
        // B has no saved copy and is skipped both times.
        assert_eq!(indexed.len(), 3);
        assert!(store.is_indexed("https://en.wikipedia.org/wiki/A").unwrap());
        assert!(!store.is_indexed("https://en.wikipedia.org/wiki/B").unwrap());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&Ok(())), 0);
        assert_eq!(exit_code(&Err(anyhow::anyhow!("boom"))), 2);
    }

    #[tokio::test]
    async fn test_bootstrap_queues_seed_links_without_indexing() {
        let dir = fixtures();
        let mut frontier = frontier(dir.path());

        assert_eq!(bootstrap(&mut frontier).await.unwrap(), 2);
        assert_eq!(frontier.queue_size(), 3);

        // The seed is still first in line
        assert_eq!(
            frontier.crawl().await.unwrap(),
            Some("https://en.wikipedia.org/wiki/Seed".to_string())
        );
    }

    #[tokio::test]
    async fn test_bootstrap_fails_on_missing_seed() {
        let dir = tempfile::tempdir().unwrap();
        let mut frontier = frontier(dir.path());

        assert!(bootstrap(&mut frontier).await.is_err());
        assert_eq!(frontier.queue_size(), 1);
    }

    #[test]
    fn test_report_orders_by_count() {
        let counts = BTreeMap::from([
            ("https://x.org/wiki/A".to_string(), 1),
            ("https://x.org/wiki/B".to_string(), 5),
            ("https://x.org/wiki/C".to_string(), 1),
        ]);
        let report = TermReport::new("The", Vec::new(), counts);

        assert_eq!(report.term, "the");
        let urls: Vec<_> = report.pages.iter().map(|h| h.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://x.org/wiki/B", "https://x.org/wiki/A", "https://x.org/wiki/C"]
        );
    }
}
